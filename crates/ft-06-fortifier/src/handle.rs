//! Thread-safe handle around a `Fortifier`.
//!
//! Every call takes the lock for its whole duration, so operations from
//! different threads never interleave.

use crate::domain::decision::{TransferDecision, TransferReceipt};
use crate::error::FortifierResult;
use crate::ports::TransferGate;
use crate::service::Fortifier;
use parking_lot::Mutex;
use shared_types::{Amount, CallContext, Principal};
use std::sync::Arc;

/// Cloneable, serialising handle.
#[derive(Clone, Debug)]
pub struct SharedFortifier {
    inner: Arc<Mutex<Fortifier>>,
}

impl SharedFortifier {
    /// Wrap `fortifier`.
    pub fn new(fortifier: Fortifier) -> Self {
        Self {
            inner: Arc::new(Mutex::new(fortifier)),
        }
    }

    /// Run `f` with exclusive access.
    pub fn with<T>(&self, f: impl FnOnce(&mut Fortifier) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Raw lock, for callers that need several operations in one critical
    /// section.
    pub fn lock(&self) -> parking_lot::MutexGuard<'_, Fortifier> {
        self.inner.lock()
    }
}

impl TransferGate for Fortifier {
    fn check_transfer(
        &self,
        ctx: &CallContext,
        recipient: &Principal,
        amount: Amount,
    ) -> FortifierResult<TransferDecision> {
        Fortifier::check_transfer(self, ctx, recipient, amount)
    }

    fn authorize_transfer(
        &mut self,
        ctx: &CallContext,
        recipient: &Principal,
        amount: Amount,
    ) -> FortifierResult<TransferReceipt> {
        Fortifier::authorize_transfer(self, ctx, recipient, amount)
    }
}

impl TransferGate for SharedFortifier {
    fn check_transfer(
        &self,
        ctx: &CallContext,
        recipient: &Principal,
        amount: Amount,
    ) -> FortifierResult<TransferDecision> {
        self.inner.lock().check_transfer(ctx, recipient, amount)
    }

    fn authorize_transfer(
        &mut self,
        ctx: &CallContext,
        recipient: &Principal,
        amount: Amount,
    ) -> FortifierResult<TransferReceipt> {
        self.inner.lock().authorize_transfer(ctx, recipient, amount)
    }
}

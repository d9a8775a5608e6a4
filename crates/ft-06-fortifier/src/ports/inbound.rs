//! # Inbound Port - TransferGate
//!
//! Driving port used by the transport layer before it moves funds.
//!
//! ## Contract
//!
//! | Method | Mutates | Veto surfaced as |
//! |--------|---------|------------------|
//! | `check_transfer` | No | `Ok(TransferDecision::Vetoed(..))` |
//! | `authorize_transfer` | Records spend on success | `Err(FortifierError)` |

use crate::domain::decision::{TransferDecision, TransferReceipt};
use crate::error::FortifierResult;
use shared_types::{Amount, CallContext, Principal};

/// Gate every guarded transfer must pass.
///
/// # Example
///
/// ```rust,ignore
/// use ft_06_fortifier::ports::TransferGate;
///
/// fn pay(gate: &mut impl TransferGate, ctx: &CallContext, to: &Principal) {
///     let receipt = gate.authorize_transfer(ctx, to, 1_000)?;
///     // ... move the funds ...
/// }
/// ```
pub trait TransferGate {
    /// Run every guard without recording anything.
    ///
    /// # Errors
    /// - `InvalidAmount`: zero amount
    /// - `StaleBlockHeight`: context older than the last committed block
    fn check_transfer(
        &self,
        ctx: &CallContext,
        recipient: &Principal,
        amount: Amount,
    ) -> FortifierResult<TransferDecision>;

    /// Run every guard and record the spend if all of them permit it.
    ///
    /// # Errors
    /// - `InvalidAmount`, `StaleBlockHeight`: as for `check_transfer`
    /// - the veto of the first guard that refused the transfer
    fn authorize_transfer(
        &mut self,
        ctx: &CallContext,
        recipient: &Principal,
        amount: Amount,
    ) -> FortifierResult<TransferReceipt>;
}

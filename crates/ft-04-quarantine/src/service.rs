//! # Quarantine Registry Service

use crate::domain::access::QuarantineOperation;
use crate::domain::entry::{validate_reason, QuarantineEntry, QuarantineLimits, Severity};
use crate::error::{QuarantineError, QuarantineResult};
use shared_bus::GuardEvent;
use shared_types::{authorize, CallContext, GuardedOperation, Principal, RoleOracle};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Per-recipient quarantine flags. Absence of a key means not quarantined.
#[derive(Debug, Default)]
pub struct QuarantineRegistry {
    entries: BTreeMap<Principal, QuarantineEntry>,
    limits: QuarantineLimits,
    pending_events: Vec<GuardEvent>,
}

impl QuarantineRegistry {
    /// An empty registry.
    pub fn new(limits: QuarantineLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// True if `recipient` has an entry.
    pub fn is_quarantined(&self, recipient: &Principal) -> bool {
        self.entries.contains_key(recipient)
    }

    /// The entry for `recipient`.
    pub fn get_entry(&self, recipient: &Principal) -> Option<&QuarantineEntry> {
        self.entries.get(recipient)
    }

    /// All entries, in recipient order.
    pub fn entries(&self) -> impl Iterator<Item = (&Principal, &QuarantineEntry)> {
        self.entries.iter()
    }

    /// Number of quarantined recipients.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nobody is quarantined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured limits.
    pub fn limits(&self) -> &QuarantineLimits {
        &self.limits
    }

    /// Take and clear pending events.
    pub fn take_events(&mut self) -> Vec<GuardEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Create or overwrite the entry for `recipient`. Last write wins.
    pub fn quarantine_recipient<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
        recipient: Principal,
        reason: impl Into<String>,
        severity: u64,
    ) -> QuarantineResult<()> {
        self.check(roles, ctx, QuarantineOperation::Quarantine)?;
        let severity = Severity::new(severity)?;
        let reason = reason.into();
        validate_reason(&reason, self.limits.max_reason_len)?;

        let overwritten = self.entries.contains_key(&recipient);
        if !overwritten && self.entries.len() >= self.limits.max_entries {
            return Err(QuarantineError::CapacityExceeded {
                max: self.limits.max_entries,
            });
        }

        self.entries.insert(
            recipient.clone(),
            QuarantineEntry {
                reason: reason.clone(),
                severity,
                quarantined_by: ctx.caller.clone(),
                at_block: ctx.block_height,
            },
        );

        info!(
            recipient = %recipient,
            severity = severity.value(),
            overwritten,
            by = %ctx.caller,
            block_height = ctx.block_height,
            "Recipient quarantined"
        );
        self.pending_events.push(GuardEvent::RecipientQuarantined {
            recipient,
            reason,
            severity: severity.value(),
            overwritten,
            by: ctx.caller.clone(),
            block_height: ctx.block_height,
        });
        Ok(())
    }

    /// Remove the entry for `recipient`.
    pub fn clear_quarantine<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
        recipient: &Principal,
    ) -> QuarantineResult<()> {
        self.check(roles, ctx, QuarantineOperation::Clear)?;
        if self.entries.remove(recipient).is_none() {
            return Err(QuarantineError::NotQuarantined {
                recipient: recipient.clone(),
            });
        }

        info!(recipient = %recipient, by = %ctx.caller, block_height = ctx.block_height, "Quarantine cleared");
        self.pending_events.push(GuardEvent::QuarantineCleared {
            recipient: recipient.clone(),
            by: ctx.caller.clone(),
            block_height: ctx.block_height,
        });
        Ok(())
    }

    fn check<R: RoleOracle + ?Sized>(
        &self,
        roles: &R,
        ctx: &CallContext,
        op: QuarantineOperation,
    ) -> QuarantineResult<()> {
        if authorize(roles, &ctx.caller, op) {
            return Ok(());
        }
        warn!(
            caller = %ctx.caller,
            operation = op.name(),
            block_height = ctx.block_height,
            "Unauthorized quarantine operation"
        );
        Err(QuarantineError::Unauthorized {
            caller: ctx.caller.clone(),
            operation: op.name(),
        })
    }
}

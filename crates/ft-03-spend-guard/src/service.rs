//! # Spend Guard Service
//!
//! Two sub-facilities behind one owner-only gate: the rolling-window spend
//! cap and the recipient filter.

use crate::domain::access::SpendGuardOperation;
use crate::domain::filter::{RecipientFilter, SpendGuardLimits};
use crate::domain::window::{SpendCapConfig, SpendWindow};
use crate::error::{SpendGuardError, SpendGuardResult};
use shared_bus::GuardEvent;
use shared_types::{
    authorize, Amount, BlockHeight, CallContext, FilterMode, GuardedOperation, Principal,
    RoleOracle,
};
use tracing::{debug, info, warn};

/// The spend guard.
#[derive(Debug, Default)]
pub struct SpendGuard {
    /// `None` until the owner configures a cap; uncapped means unlimited.
    spend_cap: Option<SpendCapConfig>,
    filter: RecipientFilter,
    limits: SpendGuardLimits,
    pending_events: Vec<GuardEvent>,
}

impl SpendGuard {
    /// An uncapped guard in `DenyList` mode with empty lists.
    pub fn new(limits: SpendGuardLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Configured cap, if any.
    pub fn spend_cap(&self) -> Option<&SpendCapConfig> {
        self.spend_cap.as_ref()
    }

    /// The recipient filter.
    pub fn filter(&self) -> &RecipientFilter {
        &self.filter
    }

    /// Current filter mode.
    pub fn filter_mode(&self) -> FilterMode {
        self.filter.mode
    }

    /// Configured limits.
    pub fn limits(&self) -> &SpendGuardLimits {
        &self.limits
    }

    /// Take and clear pending events.
    pub fn take_events(&mut self) -> Vec<GuardEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // =========================================================================
    // SPEND CAP
    // =========================================================================

    /// Configure the cap and restart the window at the current block.
    pub fn set_spend_cap<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
        cap_amount: Amount,
        period_blocks: BlockHeight,
    ) -> SpendGuardResult<()> {
        self.check(roles, ctx, SpendGuardOperation::SetSpendCap)?;
        if cap_amount == 0 {
            return Err(SpendGuardError::InvalidCapAmount);
        }
        if period_blocks == 0 {
            return Err(SpendGuardError::InvalidPeriod);
        }

        self.spend_cap = Some(SpendCapConfig::new(
            cap_amount,
            period_blocks,
            ctx.block_height,
        ));
        info!(
            cap_amount,
            period_blocks,
            block_height = ctx.block_height,
            "Spend cap set"
        );
        self.pending_events.push(GuardEvent::SpendCapSet {
            cap_amount,
            period_blocks,
            by: ctx.caller.clone(),
            block_height: ctx.block_height,
        });
        Ok(())
    }

    /// True iff `amount` fits in the window at `current_block`. Never mutates.
    pub fn check_spend_cap(&self, amount: Amount, current_block: BlockHeight) -> bool {
        let permitted = self
            .spend_cap
            .as_ref()
            .map_or(true, |cap| cap.permits(amount, current_block));
        debug!(amount, current_block, permitted, "Spend cap check");
        permitted
    }

    /// The effective window at `current_block`, if a cap is configured.
    pub fn window(&self, current_block: BlockHeight) -> Option<SpendWindow> {
        self.spend_cap
            .as_ref()
            .map(|cap| cap.window_at(current_block))
    }

    /// Record `amount` against the window, persisting any roll.
    ///
    /// Returns the updated window, or `None` when no cap is configured (in
    /// which case nothing is recorded).
    pub fn record_spend(
        &mut self,
        amount: Amount,
        current_block: BlockHeight,
    ) -> SpendGuardResult<Option<SpendWindow>> {
        let Some(cap) = self.spend_cap.as_mut() else {
            return Ok(None);
        };
        let window = cap
            .record(amount, current_block)
            .ok_or_else(|| SpendGuardError::SpendCapExceeded {
                amount,
                cap_amount: cap.cap_amount,
                window_start_block: cap.window_at(current_block).window_start_block,
            })?;

        debug!(
            amount,
            spent_in_window = window.spent_in_window,
            window_start_block = window.window_start_block,
            "Spend recorded"
        );
        self.pending_events.push(GuardEvent::SpendRecorded {
            amount,
            spent_in_window: window.spent_in_window,
            window_start_block: window.window_start_block,
            block_height: current_block,
        });
        Ok(Some(window))
    }

    // =========================================================================
    // RECIPIENT FILTER
    // =========================================================================

    /// Consult only the allow set.
    pub fn enable_allow_list<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
    ) -> SpendGuardResult<()> {
        self.set_mode(roles, ctx, FilterMode::AllowList)
    }

    /// Consult only the deny set.
    pub fn enable_deny_list<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
    ) -> SpendGuardResult<()> {
        self.set_mode(roles, ctx, FilterMode::DenyList)
    }

    /// Allow every recipient. Both sets are kept.
    pub fn disable_list<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
    ) -> SpendGuardResult<()> {
        self.set_mode(roles, ctx, FilterMode::Disabled)
    }

    /// Insert into the allow set, whatever the mode. Idempotent.
    pub fn allow_recipient<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
        recipient: Principal,
    ) -> SpendGuardResult<()> {
        self.check(roles, ctx, SpendGuardOperation::AllowRecipient)?;
        if self.insert(true, recipient.clone())? {
            info!(recipient = %recipient, block_height = ctx.block_height, "Recipient allowed");
            self.pending_events.push(GuardEvent::RecipientAllowed {
                recipient,
                by: ctx.caller.clone(),
                block_height: ctx.block_height,
            });
        }
        Ok(())
    }

    /// Insert into the deny set, whatever the mode. Idempotent.
    pub fn deny_recipient<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
        recipient: Principal,
    ) -> SpendGuardResult<()> {
        self.check(roles, ctx, SpendGuardOperation::DenyRecipient)?;
        if self.insert(false, recipient.clone())? {
            info!(recipient = %recipient, block_height = ctx.block_height, "Recipient denied");
            self.pending_events.push(GuardEvent::RecipientDenied {
                recipient,
                by: ctx.caller.clone(),
                block_height: ctx.block_height,
            });
        }
        Ok(())
    }

    /// Remove from the allow set. Idempotent.
    pub fn remove_allowed_recipient<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
        recipient: &Principal,
    ) -> SpendGuardResult<()> {
        self.unlist(roles, ctx, recipient, true)
    }

    /// Remove from the deny set. Idempotent.
    pub fn remove_denied_recipient<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
        recipient: &Principal,
    ) -> SpendGuardResult<()> {
        self.unlist(roles, ctx, recipient, false)
    }

    /// Evaluate `recipient` under the current mode.
    ///
    /// `Ok(false)` for an allow-list miss, `Err(DeniedRecipient)` for a
    /// deny-list hit.
    pub fn is_recipient_allowed(&self, recipient: &Principal) -> SpendGuardResult<bool> {
        self.filter.check(recipient)
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn set_mode<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
        mode: FilterMode,
    ) -> SpendGuardResult<()> {
        self.check(roles, ctx, SpendGuardOperation::SetFilterMode)?;
        if self.filter.mode == mode {
            return Ok(());
        }
        self.filter.mode = mode;
        info!(mode = %mode, block_height = ctx.block_height, "Recipient filter mode changed");
        self.pending_events.push(GuardEvent::FilterModeChanged {
            mode,
            by: ctx.caller.clone(),
            block_height: ctx.block_height,
        });
        Ok(())
    }

    fn insert(&mut self, allow: bool, recipient: Principal) -> SpendGuardResult<bool> {
        let max = self.limits.max_list_entries;
        let list = self.filter.list_mut(allow);
        if list.contains(&recipient) {
            return Ok(false);
        }
        if list.len() >= max {
            return Err(SpendGuardError::CapacityExceeded {
                list: if allow { "allow" } else { "deny" },
                max,
            });
        }
        Ok(list.insert(recipient))
    }

    fn unlist<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
        recipient: &Principal,
        from_allow_list: bool,
    ) -> SpendGuardResult<()> {
        self.check(roles, ctx, SpendGuardOperation::UnlistRecipient)?;
        if self.filter.list_mut(from_allow_list).remove(recipient) {
            info!(
                recipient = %recipient,
                from_allow_list,
                block_height = ctx.block_height,
                "Recipient unlisted"
            );
            self.pending_events.push(GuardEvent::RecipientUnlisted {
                recipient: recipient.clone(),
                from_allow_list,
                by: ctx.caller.clone(),
                block_height: ctx.block_height,
            });
        }
        Ok(())
    }

    fn check<R: RoleOracle + ?Sized>(
        &self,
        roles: &R,
        ctx: &CallContext,
        op: SpendGuardOperation,
    ) -> SpendGuardResult<()> {
        if authorize(roles, &ctx.caller, op) {
            return Ok(());
        }
        warn!(
            caller = %ctx.caller,
            operation = op.name(),
            block_height = ctx.block_height,
            "Unauthorized spend guard operation"
        );
        Err(SpendGuardError::Unauthorized {
            caller: ctx.caller.clone(),
            operation: op.name(),
        })
    }
}

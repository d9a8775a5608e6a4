//! # Fortifier Service
//!
//! Composition root. Owns one instance of every guard module, exposes
//! their entry points behind a single block-height monotonicity check, and
//! runs the guarded-transfer pipeline.
//!
//! ## Event Flow
//!
//! ```text
//! operation ──→ module commits + queues events
//!           ──→ Fortifier drains queues (governor, registry, breaker,
//!               spend guard, quarantine) ──→ EventPublisher
//! ```

use crate::config::FortifierConfig;
use crate::domain::decision::{TransferDecision, TransferReceipt, Veto};
use crate::error::{FortifierError, FortifierResult};
use crate::metrics;
use fortifier_telemetry::{log_decision, log_guard_event};
use ft_01_access_registry::AccessRegistry;
use ft_02_circuit_breaker::{CircuitBreaker, EffectiveState};
use ft_03_spend_guard::{SpendGuard, SpendGuardError, SpendWindow};
use ft_04_quarantine::{QuarantineEntry, QuarantineRegistry};
use ft_05_role_governance::{ApprovalOutcome, RoleChangeGovernor, SignerChangeProposal};
use shared_bus::{EventPublisher, GuardEvent, InMemoryEventBus, DEFAULT_CHANNEL_CAPACITY};
use shared_types::{
    Amount, BlockHeight, CallContext, ConfigError, ErrorCode, FilterMode, Principal, ProposalId,
    RoleOracle, RoleTag,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// The guard modules, owned together so an operation can borrow several
/// of them at once.
#[derive(Debug)]
struct Modules {
    registry: AccessRegistry,
    breaker: CircuitBreaker,
    spend_guard: SpendGuard,
    quarantine: QuarantineRegistry,
    governor: RoleChangeGovernor,
}

impl Modules {
    fn drain_events(&mut self) -> Vec<GuardEvent> {
        let mut events = self.governor.take_events();
        events.extend(self.registry.take_events());
        events.extend(self.breaker.take_events());
        events.extend(self.spend_guard.take_events());
        events.extend(self.quarantine.take_events());
        events
    }
}

/// The asset-protection policy engine.
pub struct Fortifier {
    modules: Modules,
    publisher: Arc<dyn EventPublisher>,
    config: FortifierConfig,
    /// Highest block height any successful operation has carried.
    last_block: BlockHeight,
}

impl std::fmt::Debug for Fortifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fortifier")
            .field("modules", &self.modules)
            .field("config", &self.config)
            .field("last_block", &self.last_block)
            .finish_non_exhaustive()
    }
}

impl Fortifier {
    /// Build every module from `config`, with `owner` as the sole principal.
    #[instrument(name = "fortifier_init", skip(config, publisher))]
    pub fn new(
        owner: Principal,
        config: FortifierConfig,
        publisher: Arc<dyn EventPublisher>,
    ) -> Result<Self, ConfigError> {
        if owner.is_empty() {
            return Err(ConfigError::EmptyPrincipal { field: "owner" });
        }
        config.validate()?;
        let governor_config = config.governor_config();
        governor_config.validate()?;

        let modules = Modules {
            registry: AccessRegistry::new(
                owner,
                config.governor.clone(),
                config.registry_limits(),
            ),
            breaker: CircuitBreaker::new(),
            spend_guard: SpendGuard::new(config.spend_guard_limits()),
            quarantine: QuarantineRegistry::new(config.quarantine_limits()),
            governor: RoleChangeGovernor::new(governor_config),
        };
        info!(
            owner = %modules.registry.owner(),
            governor = %config.governor,
            approval_threshold = config.approval_threshold,
            "Fortifier initialized"
        );
        metrics::set_breaker_state(&EffectiveState::Active);

        Ok(Self {
            modules,
            publisher,
            config,
            last_block: 0,
        })
    }

    /// Build with an `InMemoryEventBus` sized from `config.event_history`.
    pub fn with_default_bus(
        owner: Principal,
        config: FortifierConfig,
    ) -> Result<(Self, Arc<InMemoryEventBus>), ConfigError> {
        let bus = Arc::new(InMemoryEventBus::with_capacity(
            DEFAULT_CHANNEL_CAPACITY,
            config.event_history,
        ));
        let fortifier = Self::new(owner, config, bus.clone())?;
        Ok((fortifier, bus))
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Deployment configuration.
    pub fn config(&self) -> &FortifierConfig {
        &self.config
    }

    /// Highest block height observed by a successful operation.
    pub fn last_block(&self) -> BlockHeight {
        self.last_block
    }

    /// The access registry.
    pub fn registry(&self) -> &AccessRegistry {
        &self.modules.registry
    }

    /// The circuit breaker.
    pub fn breaker(&self) -> &CircuitBreaker {
        &self.modules.breaker
    }

    /// The spend guard.
    pub fn spend_guard(&self) -> &SpendGuard {
        &self.modules.spend_guard
    }

    /// The quarantine registry.
    pub fn quarantine(&self) -> &QuarantineRegistry {
        &self.modules.quarantine
    }

    /// The role-change governor.
    pub fn governor(&self) -> &RoleChangeGovernor {
        &self.modules.governor
    }

    /// Current owner.
    pub fn owner(&self) -> &Principal {
        self.modules.registry.owner()
    }

    // =========================================================================
    // ACCESS REGISTRY
    // =========================================================================

    /// Add a guardian. Owner only, idempotent.
    pub fn add_guardian(&mut self, ctx: &CallContext, guardian: Principal) -> FortifierResult<()> {
        self.run(ctx, "add_guardian", |m| {
            Ok(m.registry.add_guardian(ctx, guardian)?)
        })
    }

    /// Remove a guardian. Owner only, idempotent.
    pub fn remove_guardian(
        &mut self,
        ctx: &CallContext,
        guardian: &Principal,
    ) -> FortifierResult<()> {
        self.run(ctx, "remove_guardian", |m| {
            Ok(m.registry.remove_guardian(ctx, guardian)?)
        })
    }

    // =========================================================================
    // CIRCUIT BREAKER
    // =========================================================================

    /// Pause guarded activity. Owner or guardian.
    pub fn pause(&mut self, ctx: &CallContext) -> FortifierResult<()> {
        self.run(ctx, "pause", |m| Ok(m.breaker.pause(&m.registry, ctx)?))
    }

    /// Unpause immediately. Owner only.
    pub fn unpause(&mut self, ctx: &CallContext) -> FortifierResult<()> {
        self.run(ctx, "unpause", |m| Ok(m.breaker.unpause(&m.registry, ctx)?))
    }

    /// Schedule a rate-limited unpause. Owner only. Returns the activation
    /// block.
    pub fn staged_unpause(
        &mut self,
        ctx: &CallContext,
        delay_blocks: BlockHeight,
        rate_cap: Amount,
    ) -> FortifierResult<BlockHeight> {
        self.run(ctx, "staged_unpause", |m| {
            Ok(m
                .breaker
                .staged_unpause(&m.registry, ctx, delay_blocks, rate_cap)?)
        })
    }

    /// Whether the breaker reads as paused at `current_block`.
    pub fn is_paused(&self, current_block: BlockHeight) -> bool {
        self.modules.breaker.is_paused(current_block)
    }

    /// Effective breaker state at `current_block`.
    pub fn effective_state(&self, current_block: BlockHeight) -> EffectiveState {
        self.modules.breaker.effective_state(current_block)
    }

    // =========================================================================
    // SPEND GUARD
    // =========================================================================

    /// Configure the spend cap. Owner only.
    pub fn set_spend_cap(
        &mut self,
        ctx: &CallContext,
        cap_amount: Amount,
        period_blocks: BlockHeight,
    ) -> FortifierResult<()> {
        self.run(ctx, "set_spend_cap", |m| {
            Ok(m
                .spend_guard
                .set_spend_cap(&m.registry, ctx, cap_amount, period_blocks)?)
        })
    }

    /// Whether `amount` fits in the spend window at `current_block`.
    pub fn check_spend_cap(&self, amount: Amount, current_block: BlockHeight) -> bool {
        self.modules.spend_guard.check_spend_cap(amount, current_block)
    }

    /// Effective spend window at `current_block`, if a cap is configured.
    pub fn spend_window(&self, current_block: BlockHeight) -> Option<SpendWindow> {
        self.modules.spend_guard.window(current_block)
    }

    /// Switch the recipient filter to allow-list mode. Owner only.
    pub fn enable_allow_list(&mut self, ctx: &CallContext) -> FortifierResult<()> {
        self.run(ctx, "enable_allow_list", |m| {
            Ok(m.spend_guard.enable_allow_list(&m.registry, ctx)?)
        })
    }

    /// Switch the recipient filter to deny-list mode. Owner only.
    pub fn enable_deny_list(&mut self, ctx: &CallContext) -> FortifierResult<()> {
        self.run(ctx, "enable_deny_list", |m| {
            Ok(m.spend_guard.enable_deny_list(&m.registry, ctx)?)
        })
    }

    /// Turn recipient filtering off. Owner only.
    pub fn disable_list(&mut self, ctx: &CallContext) -> FortifierResult<()> {
        self.run(ctx, "disable_list", |m| {
            Ok(m.spend_guard.disable_list(&m.registry, ctx)?)
        })
    }

    /// Current recipient filter mode.
    pub fn filter_mode(&self) -> FilterMode {
        self.modules.spend_guard.filter_mode()
    }

    /// Add to the allow set. Owner only, idempotent.
    pub fn allow_recipient(
        &mut self,
        ctx: &CallContext,
        recipient: Principal,
    ) -> FortifierResult<()> {
        self.run(ctx, "allow_recipient", |m| {
            Ok(m.spend_guard.allow_recipient(&m.registry, ctx, recipient)?)
        })
    }

    /// Add to the deny set. Owner only, idempotent.
    pub fn deny_recipient(
        &mut self,
        ctx: &CallContext,
        recipient: Principal,
    ) -> FortifierResult<()> {
        self.run(ctx, "deny_recipient", |m| {
            Ok(m.spend_guard.deny_recipient(&m.registry, ctx, recipient)?)
        })
    }

    /// Remove from the allow set. Owner only, idempotent.
    pub fn remove_allowed_recipient(
        &mut self,
        ctx: &CallContext,
        recipient: &Principal,
    ) -> FortifierResult<()> {
        self.run(ctx, "remove_allowed_recipient", |m| {
            Ok(m
                .spend_guard
                .remove_allowed_recipient(&m.registry, ctx, recipient)?)
        })
    }

    /// Remove from the deny set. Owner only, idempotent.
    pub fn remove_denied_recipient(
        &mut self,
        ctx: &CallContext,
        recipient: &Principal,
    ) -> FortifierResult<()> {
        self.run(ctx, "remove_denied_recipient", |m| {
            Ok(m
                .spend_guard
                .remove_denied_recipient(&m.registry, ctx, recipient)?)
        })
    }

    /// Filter verdict for `recipient`; a deny-list hit is an error.
    pub fn is_recipient_allowed(&self, recipient: &Principal) -> FortifierResult<bool> {
        Ok(self.modules.spend_guard.is_recipient_allowed(recipient)?)
    }

    // =========================================================================
    // QUARANTINE
    // =========================================================================

    /// Quarantine `recipient`. Owner or guardian; last write wins.
    pub fn quarantine_recipient(
        &mut self,
        ctx: &CallContext,
        recipient: Principal,
        reason: impl Into<String>,
        severity: u64,
    ) -> FortifierResult<()> {
        let reason = reason.into();
        self.run(ctx, "quarantine_recipient", |m| {
            Ok(m
                .quarantine
                .quarantine_recipient(&m.registry, ctx, recipient, reason, severity)?)
        })
    }

    /// Clear `recipient`'s quarantine. Owner or guardian.
    pub fn clear_quarantine(
        &mut self,
        ctx: &CallContext,
        recipient: &Principal,
    ) -> FortifierResult<()> {
        self.run(ctx, "clear_quarantine", |m| {
            Ok(m.quarantine.clear_quarantine(&m.registry, ctx, recipient)?)
        })
    }

    /// Whether `recipient` is quarantined.
    pub fn is_quarantined(&self, recipient: &Principal) -> bool {
        self.modules.quarantine.is_quarantined(recipient)
    }

    /// Quarantine record for `recipient`.
    pub fn quarantine_entry(&self, recipient: &Principal) -> Option<&QuarantineEntry> {
        self.modules.quarantine.get_entry(recipient)
    }

    // =========================================================================
    // ROLE-CHANGE GOVERNANCE
    // =========================================================================

    /// Add an approver. Owner only, idempotent.
    pub fn add_approver(&mut self, ctx: &CallContext, approver: Principal) -> FortifierResult<()> {
        self.run(ctx, "add_approver", |m| {
            Ok(m.governor.add_approver(&mut m.registry, ctx, approver)?)
        })
    }

    /// Remove an approver. Owner only, idempotent.
    pub fn remove_approver(
        &mut self,
        ctx: &CallContext,
        approver: &Principal,
    ) -> FortifierResult<()> {
        self.run(ctx, "remove_approver", |m| {
            Ok(m.governor.remove_approver(&mut m.registry, ctx, approver)?)
        })
    }

    /// Open a proposal to give `target_role` to `new_signer`.
    pub fn propose_signer_change(
        &mut self,
        ctx: &CallContext,
        target_role: RoleTag,
        new_signer: Principal,
    ) -> FortifierResult<ProposalId> {
        self.run(ctx, "propose_signer_change", |m| {
            Ok(m
                .governor
                .propose_signer_change(&m.registry, ctx, target_role, new_signer)?)
        })
    }

    /// Approve proposal `id`, executing it once the threshold is reached.
    pub fn approve_proposal(
        &mut self,
        ctx: &CallContext,
        id: ProposalId,
    ) -> FortifierResult<ApprovalOutcome> {
        self.run(ctx, "approve_proposal", |m| {
            Ok(m.governor.approve_proposal(&mut m.registry, ctx, id)?)
        })
    }

    /// Look up a proposal.
    pub fn get_proposal(&self, id: ProposalId) -> Option<&SignerChangeProposal> {
        self.modules.governor.get_proposal(id)
    }

    // =========================================================================
    // GUARDED TRANSFERS
    // =========================================================================

    /// Run the pipeline without recording anything.
    ///
    /// Vetoes come back as `Ok(TransferDecision::Vetoed(..))`; only malformed
    /// input (zero amount, stale block) is an `Err`.
    pub fn check_transfer(
        &self,
        ctx: &CallContext,
        recipient: &Principal,
        amount: Amount,
    ) -> FortifierResult<TransferDecision> {
        self.validate_transfer_input(ctx, amount)?;
        let decision = self.evaluate(recipient, amount, ctx.block_height)?;
        debug!(
            recipient = %recipient,
            amount,
            block_height = ctx.block_height,
            permitted = decision.is_permitted(),
            "Transfer checked"
        );
        Ok(decision)
    }

    /// Run the pipeline and, if every guard permits, record the spend.
    ///
    /// A veto publishes `TransferRejected` and returns the matching error.
    pub fn authorize_transfer(
        &mut self,
        ctx: &CallContext,
        recipient: &Principal,
        amount: Amount,
    ) -> FortifierResult<TransferReceipt> {
        self.validate_transfer_input(ctx, amount)?;
        let block_height = ctx.block_height;

        let rate_cap = match self.evaluate(recipient, amount, block_height)? {
            TransferDecision::Permitted { rate_cap } => rate_cap,
            TransferDecision::Vetoed(veto) => return Err(self.reject(ctx, recipient, amount, veto)),
        };

        let window = self.modules.spend_guard.record_spend(amount, block_height)?;
        self.last_block = self.last_block.max(block_height);
        self.flush();
        self.publisher.publish(GuardEvent::TransferAuthorized {
            recipient: recipient.clone(),
            amount,
            by: ctx.caller.clone(),
            block_height,
        });

        metrics::record_transfer_authorized();
        log_decision!(info, block_height, recipient, amount, true, "Transfer authorized");

        Ok(TransferReceipt {
            recipient: recipient.clone(),
            amount,
            block_height,
            window,
            rate_cap,
        })
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    /// Reject contexts older than anything already observed.
    fn ensure_fresh(&self, ctx: &CallContext) -> FortifierResult<()> {
        if ctx.block_height < self.last_block {
            return Err(FortifierError::StaleBlockHeight {
                block_height: ctx.block_height,
                last_seen: self.last_block,
            });
        }
        Ok(())
    }

    fn validate_transfer_input(&self, ctx: &CallContext, amount: Amount) -> FortifierResult<()> {
        if amount == 0 {
            return Err(FortifierError::InvalidAmount);
        }
        self.ensure_fresh(ctx)
    }

    /// Run one admin operation and publish whatever it committed.
    fn run<T, F>(&mut self, ctx: &CallContext, operation: &'static str, op: F) -> FortifierResult<T>
    where
        F: FnOnce(&mut Modules) -> FortifierResult<T>,
    {
        self.ensure_fresh(ctx)?;
        let value = op(&mut self.modules)?;
        self.last_block = self.last_block.max(ctx.block_height);
        self.flush();

        metrics::record_admin_action(operation);
        metrics::set_breaker_state(&self.modules.breaker.effective_state(ctx.block_height));
        debug!(operation, caller = %ctx.caller, block_height = ctx.block_height, "Admin operation committed");
        Ok(value)
    }

    fn flush(&mut self) {
        for event in self.modules.drain_events() {
            if matches!(event, GuardEvent::ProposalExecuted { .. }) {
                metrics::record_proposal_executed();
            }
            log_guard_event!(
                debug,
                event.source_module(),
                event.block_height(),
                "Publishing guard event",
                topic = ?event.topic()
            );
            self.publisher.publish(event);
        }
    }

    /// The pipeline proper: breaker, spend guard, quarantine, in that order.
    fn evaluate(
        &self,
        recipient: &Principal,
        amount: Amount,
        block_height: BlockHeight,
    ) -> FortifierResult<TransferDecision> {
        let rate_cap = match self.modules.breaker.effective_state(block_height) {
            EffectiveState::Paused => return Ok(TransferDecision::Vetoed(Veto::Paused)),
            EffectiveState::RateLimited { rate_cap } if amount > rate_cap => {
                return Ok(TransferDecision::Vetoed(Veto::RateCapExceeded { rate_cap }));
            }
            EffectiveState::RateLimited { rate_cap } => Some(rate_cap),
            EffectiveState::Active => None,
        };

        let spend_guard = &self.modules.spend_guard;
        if !spend_guard.check_spend_cap(amount, block_height) {
            return Ok(TransferDecision::Vetoed(Veto::SpendCapExceeded));
        }
        match spend_guard.is_recipient_allowed(recipient) {
            Ok(true) => {}
            Ok(false) => return Ok(TransferDecision::Vetoed(Veto::RecipientNotAllowed)),
            Err(SpendGuardError::DeniedRecipient { .. }) => {
                return Ok(TransferDecision::Vetoed(Veto::RecipientDenied));
            }
            Err(e) => return Err(e.into()),
        }

        if let Some(entry) = self.modules.quarantine.get_entry(recipient) {
            return Ok(TransferDecision::Vetoed(Veto::RecipientQuarantined {
                severity: entry.severity.value(),
            }));
        }

        Ok(TransferDecision::Permitted { rate_cap })
    }

    fn reject(
        &self,
        ctx: &CallContext,
        recipient: &Principal,
        amount: Amount,
        veto: Veto,
    ) -> FortifierError {
        let err = veto.into_error(recipient, amount);
        self.publisher.publish(GuardEvent::TransferRejected {
            recipient: recipient.clone(),
            amount,
            by: ctx.caller.clone(),
            reason_code: err.code(),
            block_height: ctx.block_height,
        });
        metrics::record_transfer_rejected(veto.label());
        log_decision!(
            warn,
            ctx.block_height,
            recipient,
            amount,
            false,
            "Transfer vetoed",
            reason = veto.label()
        );
        err
    }
}

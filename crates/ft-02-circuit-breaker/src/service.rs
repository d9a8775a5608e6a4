//! # Circuit Breaker Service
//!
//! Authorizes the caller against the registry, runs the pure transition in
//! `domain::state`, and commits the result.

use crate::domain::access::BreakerOperation;
use crate::domain::state::{BreakerCommand, EffectiveState, PauseState};
use crate::error::{BreakerError, BreakerResult};
use shared_bus::GuardEvent;
use shared_types::{authorize, Amount, BlockHeight, CallContext, GuardedOperation, RoleOracle};
use tracing::{debug, info, warn};

/// The global circuit breaker.
#[derive(Debug, Default)]
pub struct CircuitBreaker {
    state: PauseState,
    /// Total successful pauses.
    pause_count: u64,
    pending_events: Vec<GuardEvent>,
}

impl CircuitBreaker {
    /// A breaker in `Active`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Persisted record.
    pub fn state(&self) -> &PauseState {
        &self.state
    }

    /// True while guarded activity is halted at `current_block`.
    pub fn is_paused(&self, current_block: BlockHeight) -> bool {
        self.effective_state(current_block) == EffectiveState::Paused
    }

    /// The record resolved against `current_block`.
    pub fn effective_state(&self, current_block: BlockHeight) -> EffectiveState {
        let effective = self.state.effective(current_block);
        debug!(current_block, state = ?effective, "Breaker state query");
        effective
    }

    /// Per-operation ceiling while rate-limited active.
    pub fn rate_cap(&self, current_block: BlockHeight) -> Option<Amount> {
        match self.effective_state(current_block) {
            EffectiveState::RateLimited { rate_cap } => Some(rate_cap),
            EffectiveState::Active | EffectiveState::Paused => None,
        }
    }

    /// Total successful pauses.
    pub fn pause_count(&self) -> u64 {
        self.pause_count
    }

    /// Take and clear pending events.
    pub fn take_events(&mut self) -> Vec<GuardEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Halt guarded activity. Owner or guardian.
    pub fn pause<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
    ) -> BreakerResult<()> {
        self.check(roles, ctx, BreakerOperation::Pause)?;
        self.state = self.state.next_state(BreakerCommand::Pause, ctx)?;
        self.pause_count += 1;

        info!(by = %ctx.caller, block_height = ctx.block_height, "Circuit breaker paused");
        self.pending_events.push(GuardEvent::Paused {
            by: ctx.caller.clone(),
            block_height: ctx.block_height,
        });
        Ok(())
    }

    /// Return to `Active` immediately, clearing any staged record. Owner only.
    pub fn unpause<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
    ) -> BreakerResult<()> {
        self.check(roles, ctx, BreakerOperation::Unpause)?;
        self.state = self.state.next_state(BreakerCommand::Unpause, ctx)?;

        info!(by = %ctx.caller, block_height = ctx.block_height, "Circuit breaker unpaused");
        self.pending_events.push(GuardEvent::Unpaused {
            by: ctx.caller.clone(),
            block_height: ctx.block_height,
        });
        Ok(())
    }

    /// Schedule a rate-limited unpause `delay_blocks` from now. Owner only.
    ///
    /// Returns the activation block.
    pub fn staged_unpause<R: RoleOracle + ?Sized>(
        &mut self,
        roles: &R,
        ctx: &CallContext,
        delay_blocks: BlockHeight,
        rate_cap: Amount,
    ) -> BreakerResult<BlockHeight> {
        self.check(roles, ctx, BreakerOperation::StagedUnpause)?;
        let next = self.state.next_state(
            BreakerCommand::StagedUnpause {
                delay_blocks,
                rate_cap,
            },
            ctx,
        )?;
        let activation_block = match &next {
            PauseState::PausedPendingUnpause {
                activation_block, ..
            } => *activation_block,
            // The transition only ever yields the pending variant here.
            PauseState::Active | PauseState::Paused { .. } => ctx.block_height,
        };
        self.state = next;

        info!(
            by = %ctx.caller,
            block_height = ctx.block_height,
            activation_block,
            rate_cap,
            "Staged unpause scheduled"
        );
        self.pending_events.push(GuardEvent::StagedUnpauseScheduled {
            by: ctx.caller.clone(),
            activation_block,
            rate_cap,
            block_height: ctx.block_height,
        });
        Ok(activation_block)
    }

    fn check<R: RoleOracle + ?Sized>(
        &self,
        roles: &R,
        ctx: &CallContext,
        op: BreakerOperation,
    ) -> BreakerResult<()> {
        if authorize(roles, &ctx.caller, op) {
            return Ok(());
        }
        warn!(
            caller = %ctx.caller,
            operation = op.name(),
            block_height = ctx.block_height,
            "Unauthorized breaker operation"
        );
        Err(BreakerError::Unauthorized {
            caller: ctx.caller.clone(),
            operation: op.name(),
        })
    }
}

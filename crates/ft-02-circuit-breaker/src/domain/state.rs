//! Pause state machine.
//!
//! ```text
//! [ACTIVE] ──pause──→ [PAUSED {by, at_block}]
//!    ↑                     │            │
//!    │                     │            └── staged_unpause(delay, cap) ──→ [PENDING {activation_block, rate_cap}]
//!    │                     │                                                   │
//!    └──────── unpause ────┴───────────────────── unpause ─────────────────────┘
//!
//! PENDING reads as paused while current_block < activation_block and as
//! rate-limited active afterwards; only an explicit unpause clears it.
//! ```

use crate::error::BreakerError;
use serde::{Deserialize, Serialize};
use shared_types::{Amount, BlockHeight, CallContext, Principal};

/// Persisted breaker record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseState {
    /// Guarded activity flows normally.
    #[default]
    Active,
    /// Guarded activity is halted.
    Paused {
        /// Who paused.
        by: Principal,
        /// Block at which the pause was committed.
        at_block: BlockHeight,
    },
    /// Paused, with an unpause scheduled for `activation_block`.
    PausedPendingUnpause {
        /// First block at which the breaker reads as not paused.
        /// Always strictly greater than `scheduled_at`.
        activation_block: BlockHeight,
        /// Per-operation ceiling once active.
        rate_cap: Amount,
        /// Block at which the schedule was committed.
        scheduled_at: BlockHeight,
        /// Who scheduled it.
        scheduled_by: Principal,
    },
}

/// How the breaker reads at a given block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectiveState {
    /// No restriction.
    Active,
    /// Everything halted.
    Paused,
    /// Staged unpause has activated; each operation is capped.
    RateLimited {
        /// Per-operation ceiling.
        rate_cap: Amount,
    },
}

/// Input to the transition function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakerCommand {
    /// Halt activity.
    Pause,
    /// Clear any pause or staged record.
    Unpause,
    /// Schedule an unpause `delay_blocks` from now.
    StagedUnpause {
        /// Blocks until activation.
        delay_blocks: BlockHeight,
        /// Ceiling once active.
        rate_cap: Amount,
    },
}

impl PauseState {
    /// Resolve the record against the current block.
    #[must_use]
    pub fn effective(&self, current_block: BlockHeight) -> EffectiveState {
        match self {
            Self::Active => EffectiveState::Active,
            Self::Paused { .. } => EffectiveState::Paused,
            Self::PausedPendingUnpause {
                activation_block,
                rate_cap,
                ..
            } => {
                if current_block < *activation_block {
                    EffectiveState::Paused
                } else {
                    EffectiveState::RateLimited {
                        rate_cap: *rate_cap,
                    }
                }
            }
        }
    }

    /// Compute the next record.
    ///
    /// Pure and deterministic: the caller commits the result only on `Ok`.
    /// Authorization is not checked here.
    pub fn next_state(
        &self,
        command: BreakerCommand,
        ctx: &CallContext,
    ) -> Result<PauseState, BreakerError> {
        let now = ctx.block_height;
        match (self, command) {
            (Self::Active, BreakerCommand::Pause) => Ok(Self::paused(ctx)),
            (Self::PausedPendingUnpause { .. }, BreakerCommand::Pause)
                if self.effective(now) != EffectiveState::Paused =>
            {
                Ok(Self::paused(ctx))
            }
            (_, BreakerCommand::Pause) => Err(BreakerError::AlreadyPaused),

            (Self::Active, BreakerCommand::Unpause) => Err(BreakerError::NotPaused),
            (_, BreakerCommand::Unpause) => Ok(Self::Active),

            (
                Self::Paused { .. },
                BreakerCommand::StagedUnpause {
                    delay_blocks,
                    rate_cap,
                },
            ) => {
                if rate_cap == 0 {
                    return Err(BreakerError::InvalidRateCap);
                }
                let activation_block = match (delay_blocks, now.checked_add(delay_blocks)) {
                    (0, _) | (_, None) => return Err(BreakerError::InvalidDelay { delay_blocks }),
                    (_, Some(block)) => block,
                };
                Ok(Self::PausedPendingUnpause {
                    activation_block,
                    rate_cap,
                    scheduled_at: now,
                    scheduled_by: ctx.caller.clone(),
                })
            }
            (Self::PausedPendingUnpause { .. }, BreakerCommand::StagedUnpause { .. }) => {
                Err(BreakerError::UnpauseAlreadyStaged)
            }
            (Self::Active, BreakerCommand::StagedUnpause { .. }) => Err(BreakerError::NotPaused),
        }
    }

    fn paused(ctx: &CallContext) -> Self {
        Self::Paused {
            by: ctx.caller.clone(),
            at_block: ctx.block_height,
        }
    }
}

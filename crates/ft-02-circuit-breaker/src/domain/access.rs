//! Access table for breaker transitions.

use shared_types::{GuardedOperation, Role};

/// Every mutating breaker operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakerOperation {
    /// Halt guarded activity.
    Pause,
    /// Return to `Active` immediately.
    Unpause,
    /// Schedule a delayed, rate-limited unpause.
    StagedUnpause,
}

impl GuardedOperation for BreakerOperation {
    fn name(self) -> &'static str {
        match self {
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::StagedUnpause => "staged_unpause",
        }
    }

    fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::Pause => &[Role::Owner, Role::Guardian],
            Self::Unpause | Self::StagedUnpause => &[Role::Owner],
        }
    }
}

//! Error types for the circuit breaker.

use shared_types::{BlockHeight, ErrorCode, ErrorKind, Principal};
use thiserror::Error;

/// Circuit breaker errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreakerError {
    /// Caller does not hold a role allowed to perform the operation.
    #[error("unauthorized: {caller} may not call {operation}")]
    Unauthorized {
        caller: Principal,
        operation: &'static str,
    },

    /// The breaker is already paused.
    #[error("circuit breaker is already paused")]
    AlreadyPaused,

    /// The operation requires a paused breaker.
    #[error("circuit breaker is not paused")]
    NotPaused,

    /// Staged unpause delay must be positive and must not overflow.
    #[error("invalid staged unpause delay: {delay_blocks} blocks")]
    InvalidDelay { delay_blocks: BlockHeight },

    /// Staged unpause rate cap must be positive.
    #[error("staged unpause rate cap must be greater than zero")]
    InvalidRateCap,

    /// A staged unpause is already scheduled.
    #[error("an unpause is already staged")]
    UnpauseAlreadyStaged,
}

impl ErrorCode for BreakerError {
    fn code(&self) -> u32 {
        match self {
            Self::Unauthorized { .. } => 1001,
            Self::AlreadyPaused => 1002,
            Self::NotPaused => 1003,
            Self::InvalidDelay { .. } => 1004,
            Self::InvalidRateCap => 1005,
            Self::UnpauseAlreadyStaged => 1006,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::AlreadyPaused | Self::NotPaused | Self::UnpauseAlreadyStaged => {
                ErrorKind::StateMismatch
            }
            Self::InvalidDelay { .. } | Self::InvalidRateCap => ErrorKind::InvalidParameter,
        }
    }
}

/// Result type for breaker operations.
pub type BreakerResult<T> = Result<T, BreakerError>;

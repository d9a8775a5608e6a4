//! Error types for the spend guard.

use shared_types::{Amount, BlockHeight, ErrorCode, ErrorKind, Principal};
use thiserror::Error;

/// Spend guard errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpendGuardError {
    /// Caller does not hold a role allowed to perform the operation.
    #[error("unauthorized: {caller} may not call {operation}")]
    Unauthorized {
        caller: Principal,
        operation: &'static str,
    },

    /// Cap amount must be positive.
    #[error("spend cap amount must be greater than zero")]
    InvalidCapAmount,

    /// Recipient is on the active deny list.
    #[error("recipient {recipient} is denied")]
    DeniedRecipient { recipient: Principal },

    /// Period must be positive.
    #[error("spend cap period must be greater than zero")]
    InvalidPeriod,

    /// Recording the spend would exceed the cap for the current window.
    #[error("spend of {amount} exceeds cap {cap_amount} (window from block {window_start_block})")]
    SpendCapExceeded {
        amount: Amount,
        cap_amount: Amount,
        window_start_block: BlockHeight,
    },

    /// A recipient list is full.
    #[error("{list} list is full ({max} entries)")]
    CapacityExceeded { list: &'static str, max: usize },
}

impl ErrorCode for SpendGuardError {
    fn code(&self) -> u32 {
        match self {
            Self::Unauthorized { .. } => 2001,
            Self::InvalidCapAmount => 2002,
            Self::DeniedRecipient { .. } => 2003,
            Self::InvalidPeriod => 2004,
            Self::SpendCapExceeded { .. } => 2005,
            Self::CapacityExceeded { .. } => 2006,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InvalidCapAmount | Self::InvalidPeriod => ErrorKind::InvalidParameter,
            Self::DeniedRecipient { .. } | Self::SpendCapExceeded { .. } => ErrorKind::PolicyDenied,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
        }
    }
}

/// Result type for spend guard operations.
pub type SpendGuardResult<T> = Result<T, SpendGuardError>;

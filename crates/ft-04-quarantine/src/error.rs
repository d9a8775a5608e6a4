//! Error types for the quarantine registry.

use shared_types::{ErrorCode, ErrorKind, Principal};
use thiserror::Error;

/// Quarantine registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuarantineError {
    /// Caller does not hold a role allowed to perform the operation.
    #[error("unauthorized: {caller} may not call {operation}")]
    Unauthorized {
        caller: Principal,
        operation: &'static str,
    },

    /// Severity outside `0..=10`.
    #[error("severity {severity} is outside 0..=10")]
    InvalidSeverity { severity: u64 },

    /// Recipient has no entry.
    #[error("recipient {recipient} is not quarantined")]
    NotQuarantined { recipient: Principal },

    /// Reason is not ASCII or is too long.
    #[error("invalid reason: must be ASCII and at most {max_len} bytes (got {len})")]
    InvalidReason { len: usize, max_len: usize },

    /// The map is full and the recipient is not already present.
    #[error("quarantine registry is full ({max} entries)")]
    CapacityExceeded { max: usize },
}

impl ErrorCode for QuarantineError {
    fn code(&self) -> u32 {
        match self {
            Self::Unauthorized { .. } => 3001,
            Self::InvalidSeverity { .. } => 3002,
            Self::NotQuarantined { .. } => 3003,
            Self::InvalidReason { .. } => 3004,
            Self::CapacityExceeded { .. } => 3005,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InvalidSeverity { .. } | Self::InvalidReason { .. } => {
                ErrorKind::InvalidParameter
            }
            Self::NotQuarantined { .. } => ErrorKind::StateMismatch,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
        }
    }
}

/// Result type for quarantine operations.
pub type QuarantineResult<T> = Result<T, QuarantineError>;

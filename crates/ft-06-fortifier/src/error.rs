//! Error types for the composition root.
//!
//! Module errors pass through unchanged (with their own codes); the
//! transfer pipeline adds its own veto errors in the 6000 range.

use ft_01_access_registry::RegistryError;
use ft_02_circuit_breaker::BreakerError;
use ft_03_spend_guard::SpendGuardError;
use ft_04_quarantine::QuarantineError;
use ft_05_role_governance::GovernanceError;
use shared_types::{Amount, BlockHeight, ErrorCode, ErrorKind, Principal};
use thiserror::Error;

/// Errors surfaced by `Fortifier`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FortifierError {
    /// Access registry failure.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Circuit breaker failure.
    #[error(transparent)]
    Breaker(#[from] BreakerError),

    /// Spend guard failure (including `DeniedRecipient` vetoes).
    #[error(transparent)]
    SpendGuard(#[from] SpendGuardError),

    /// Quarantine registry failure.
    #[error(transparent)]
    Quarantine(#[from] QuarantineError),

    /// Governance failure.
    #[error(transparent)]
    Governance(#[from] GovernanceError),

    /// The breaker reads as paused.
    #[error("guarded transfers are paused")]
    TransfersPaused,

    /// The breaker is rate-limited and the amount exceeds its ceiling.
    #[error("amount {amount} exceeds the staged unpause rate cap {rate_cap}")]
    RateCapExceeded { amount: Amount, rate_cap: Amount },

    /// The spend cap window has no room for the amount.
    #[error("amount {amount} exceeds the remaining spend cap")]
    SpendCapExceeded { amount: Amount },

    /// Allow-list mode and the recipient is not listed.
    #[error("recipient {recipient} is not on the allow list")]
    RecipientNotAllowed { recipient: Principal },

    /// The recipient is quarantined.
    #[error("recipient {recipient} is quarantined (severity {severity})")]
    RecipientQuarantined { recipient: Principal, severity: u8 },

    /// The context's block height is below one already observed.
    #[error("stale block height {block_height} (last seen {last_seen})")]
    StaleBlockHeight {
        block_height: BlockHeight,
        last_seen: BlockHeight,
    },

    /// Transfers must move a positive amount.
    #[error("transfer amount must be greater than zero")]
    InvalidAmount,
}

impl ErrorCode for FortifierError {
    fn code(&self) -> u32 {
        match self {
            Self::Registry(e) => e.code(),
            Self::Breaker(e) => e.code(),
            Self::SpendGuard(e) => e.code(),
            Self::Quarantine(e) => e.code(),
            Self::Governance(e) => e.code(),
            Self::TransfersPaused => 6001,
            Self::RateCapExceeded { .. } => 6002,
            Self::SpendCapExceeded { .. } => 6003,
            Self::RecipientNotAllowed { .. } => 6004,
            Self::RecipientQuarantined { .. } => 6005,
            Self::StaleBlockHeight { .. } => 6006,
            Self::InvalidAmount => 6007,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::Registry(e) => e.kind(),
            Self::Breaker(e) => e.kind(),
            Self::SpendGuard(e) => e.kind(),
            Self::Quarantine(e) => e.kind(),
            Self::Governance(e) => e.kind(),
            Self::TransfersPaused
            | Self::RateCapExceeded { .. }
            | Self::SpendCapExceeded { .. }
            | Self::RecipientNotAllowed { .. }
            | Self::RecipientQuarantined { .. } => ErrorKind::PolicyDenied,
            Self::StaleBlockHeight { .. } | Self::InvalidAmount => ErrorKind::InvalidParameter,
        }
    }
}

/// Result type for facade operations.
pub type FortifierResult<T> = Result<T, FortifierError>;

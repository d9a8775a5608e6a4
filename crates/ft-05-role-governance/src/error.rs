//! Error types for role-change governance.

use ft_01_access_registry::RegistryError;
use shared_types::{ErrorCode, ErrorKind, Principal, ProposalId};
use thiserror::Error;

/// Governance errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    /// Caller does not hold a role allowed to perform the operation.
    #[error("unauthorized: {caller} may not call {operation}")]
    Unauthorized {
        caller: Principal,
        operation: &'static str,
    },

    /// No proposal with this id.
    #[error("proposal {id} not found")]
    ProposalNotFound { id: ProposalId },

    /// The proposal is already executed and immutable.
    #[error("proposal {id} is already executed")]
    AlreadyExecuted { id: ProposalId },

    /// The registry refused the role change or membership update.
    #[error("registry rejected the change: {0}")]
    Registry(#[from] RegistryError),

    /// The id counter cannot advance.
    #[error("proposal id space exhausted")]
    ProposalIdsExhausted,
}

impl ErrorCode for GovernanceError {
    fn code(&self) -> u32 {
        match self {
            Self::Unauthorized { .. } => 4001,
            Self::ProposalNotFound { .. } => 4002,
            Self::AlreadyExecuted { .. } => 4003,
            // Surface the registry's own code.
            Self::Registry(inner) => inner.code(),
            Self::ProposalIdsExhausted => 4004,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::ProposalNotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExecuted { .. } => ErrorKind::StateMismatch,
            Self::Registry(inner) => inner.kind(),
            Self::ProposalIdsExhausted => ErrorKind::CapacityExceeded,
        }
    }
}

/// Result type for governance operations.
pub type GovernanceResult<T> = Result<T, GovernanceError>;

//! Error types for the access registry.

use shared_types::{ErrorCode, ErrorKind, Principal, Role};
use thiserror::Error;

/// Access registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Caller does not hold a role allowed to perform the operation.
    #[error("unauthorized: {caller} may not call {operation}")]
    Unauthorized {
        caller: Principal,
        operation: &'static str,
    },

    /// The role set is full.
    #[error("{role} set is full ({max} members)")]
    CapacityExceeded { role: Role, max: usize },

    /// A replacement targeted a principal that does not hold the role.
    #[error("{member} is not a {role}")]
    NotAMember { role: Role, member: Principal },
}

impl ErrorCode for RegistryError {
    fn code(&self) -> u32 {
        match self {
            Self::Unauthorized { .. } => 5001,
            Self::CapacityExceeded { .. } => 5002,
            Self::NotAMember { .. } => 5003,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::NotAMember { .. } => ErrorKind::NotFound,
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

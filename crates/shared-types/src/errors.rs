//! # Error Classification
//!
//! Every module error maps onto one of a small number of kinds so that the
//! transport layer can react to a failure without knowing which module
//! produced it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a guard failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Caller lacks the required role.
    Unauthorized,
    /// Operation is not valid in the current state (already paused,
    /// already executed, ...).
    StateMismatch,
    /// Argument out of range (severity, zero cap, zero delay, ...).
    InvalidParameter,
    /// A policy vetoed the operation (denied recipient, cap exceeded, ...).
    PolicyDenied,
    /// Referenced record does not exist.
    NotFound,
    /// A caller-bounded set is full.
    CapacityExceeded,
}

impl ErrorKind {
    /// Stable lowercase label, used for metrics and log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::StateMismatch => "state_mismatch",
            Self::InvalidParameter => "invalid_parameter",
            Self::PolicyDenied => "policy_denied",
            Self::NotFound => "not_found",
            Self::CapacityExceeded => "capacity_exceeded",
        }
    }
}

/// Implemented by every module error.
pub trait ErrorCode: std::error::Error {
    /// Stable numeric code surfaced to callers.
    fn code(&self) -> u32;

    /// Category of the failure.
    fn kind(&self) -> ErrorKind;
}

/// Errors raised while validating deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A numeric parameter that must be positive was zero.
    #[error("invalid configuration: {field} must be greater than zero")]
    ZeroValue { field: &'static str },

    /// A principal parameter was empty.
    #[error("invalid configuration: {field} must not be empty")]
    EmptyPrincipal { field: &'static str },

    /// An environment variable or document value could not be parsed.
    #[error("invalid configuration: cannot parse {field}: {reason}")]
    Parse { field: String, reason: String },
}

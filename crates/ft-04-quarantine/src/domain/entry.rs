//! Quarantine entries and their validated fields.

use crate::error::{QuarantineError, QuarantineResult};
use serde::{Deserialize, Serialize};
use shared_types::{BlockHeight, Principal};
use std::fmt;

/// Severity score in `0..=10`.
///
/// Only constructible through `Severity::new`, so an out-of-range value
/// can never be stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u8")]
pub struct Severity(u8);

impl Severity {
    /// Highest accepted score.
    pub const MAX: u8 = 10;

    /// Validate a raw score.
    pub fn new(raw: u64) -> QuarantineResult<Self> {
        match u8::try_from(raw) {
            Ok(score) if score <= Self::MAX => Ok(Self(score)),
            _ => Err(QuarantineError::InvalidSeverity { severity: raw }),
        }
    }

    /// The score.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u64> for Severity {
    type Error = QuarantineError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// Bounds on the quarantine map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarantineLimits {
    /// Maximum number of quarantined recipients.
    pub max_entries: usize,
    /// Maximum reason length in bytes.
    pub max_reason_len: usize,
}

impl Default for QuarantineLimits {
    fn default() -> Self {
        Self {
            max_entries: 1024,
            max_reason_len: 256,
        }
    }
}

/// One quarantined recipient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarantineEntry {
    /// Free-form ASCII reason.
    pub reason: String,
    /// Severity score.
    pub severity: Severity,
    /// Who set the flag (or last overwrote it).
    pub quarantined_by: Principal,
    /// Block of the last write.
    pub at_block: BlockHeight,
}

/// Reasons are short ASCII strings.
pub(crate) fn validate_reason(reason: &str, max_len: usize) -> QuarantineResult<()> {
    if reason.is_ascii() && reason.len() <= max_len {
        Ok(())
    } else {
        Err(QuarantineError::InvalidReason {
            len: reason.len(),
            max_len,
        })
    }
}

//! Access table for quarantine mutations.

use shared_types::{GuardedOperation, Role};

/// Every mutating quarantine operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuarantineOperation {
    /// Create or overwrite an entry.
    Quarantine,
    /// Remove an entry.
    Clear,
}

impl GuardedOperation for QuarantineOperation {
    fn name(self) -> &'static str {
        match self {
            Self::Quarantine => "quarantine_recipient",
            Self::Clear => "clear_quarantine",
        }
    }

    fn allowed_roles(self) -> &'static [Role] {
        &[Role::Owner, Role::Guardian]
    }
}

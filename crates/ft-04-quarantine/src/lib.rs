//! # FT-04 Quarantine Registry
//!
//! Per-recipient flags that block guarded operations against the flagged
//! account.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Severity is always in `0..=10` | `domain/entry.rs` - `Severity::new()` |
//! | INVARIANT-2 | Absence of a key means not quarantined | `service.rs` - `is_quarantined()` |
//! | INVARIANT-3 | Overwrites are last-write-wins, no history | `service.rs` - `quarantine_recipient()` |
//! | INVARIANT-4 | Clearing an unknown recipient fails | `service.rs` - `NotQuarantined` |
//!
//! ## Access Table
//!
//! | Operation | Allowed Roles |
//! |-----------|---------------|
//! | `quarantine_recipient` | Owner, Guardian |
//! | `clear_quarantine` | Owner, Guardian |
//! | `is_quarantined` | Any |

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod domain;
pub mod error;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::entry::{QuarantineEntry, QuarantineLimits, Severity};
    pub use crate::error::{QuarantineError, QuarantineResult};
    pub use crate::service::QuarantineRegistry;
}

pub use domain::access::QuarantineOperation;
pub use domain::entry::{QuarantineEntry, QuarantineLimits, Severity};
pub use error::{QuarantineError, QuarantineResult};
pub use service::QuarantineRegistry;

/// Module ID used in error codes and logs.
pub const MODULE_ID: u8 = 4;

/// Module name.
pub const MODULE_NAME: &str = "quarantine";

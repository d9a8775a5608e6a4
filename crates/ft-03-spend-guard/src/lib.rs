//! # FT-03 Spend Guard
//!
//! Rolling-window spend cap plus a recipient allow/deny filter.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | `spent_in_window <= cap_amount` after any recording | `domain/window.rs` - `SpendCapConfig::record()` |
//! | INVARIANT-2 | Window anchor only moves forward, by whole periods | `domain/window.rs` - `SpendCapConfig::window_at()` |
//! | INVARIANT-3 | Checks never mutate | `service.rs` - `check_spend_cap(&self)` |
//! | INVARIANT-4 | Both recipient sets survive mode switches | `domain/filter.rs` - `RecipientFilter` |
//! | INVARIANT-5 | Recipient lists stay caller-bounded | `domain/filter.rs` - `SpendGuardLimits` |
//!
//! ## Access Table
//!
//! | Operation | Allowed Roles |
//! |-----------|---------------|
//! | `set_spend_cap` | Owner |
//! | `enable_allow_list` / `enable_deny_list` / `disable_list` | Owner |
//! | `allow_recipient` / `deny_recipient` / `remove_*_recipient` | Owner |
//! | `check_spend_cap` / `is_recipient_allowed` | Any |
//! | `record_spend` | Transfer pipeline only (not role-gated) |

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod domain;
pub mod error;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::filter::{RecipientFilter, SpendGuardLimits};
    pub use crate::domain::window::{SpendCapConfig, SpendWindow};
    pub use crate::error::{SpendGuardError, SpendGuardResult};
    pub use crate::service::SpendGuard;
}

pub use domain::access::SpendGuardOperation;
pub use domain::filter::{RecipientFilter, SpendGuardLimits};
pub use domain::window::{SpendCapConfig, SpendWindow};
pub use error::{SpendGuardError, SpendGuardResult};
pub use service::SpendGuard;

/// Module ID used in error codes and logs.
pub const MODULE_ID: u8 = 3;

/// Module name.
pub const MODULE_NAME: &str = "spend-guard";

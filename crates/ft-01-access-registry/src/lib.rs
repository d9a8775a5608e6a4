//! # FT-01 Access Registry
//!
//! Holds the single owner, the guardian set and the approver set, and
//! answers role-membership queries for every other guard module.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Exactly one owner, always defined | `domain/state.rs` - `RegistryState::owner` is not optional |
//! | INVARIANT-2 | Owner passes guardian/approver checks implicitly | `shared_types::RoleOracle::is_guardian` / `is_approver` |
//! | INVARIANT-3 | Membership changes are owner-only and idempotent | `service.rs` - `add_guardian()` etc. |
//! | INVARIANT-4 | The owner role only moves through the governor identity | `service.rs` - `set_owner()`, `apply_role_change()` |
//! | INVARIANT-5 | Role sets stay caller-bounded | `domain/state.rs` - `RegistryLimits` |
//!
//! ## Access Table
//!
//! | Operation | Allowed Roles |
//! |-----------|---------------|
//! | `add_guardian` / `remove_guardian` | Owner |
//! | `add_approver` / `remove_approver` | Owner |
//! | `set_owner` / `apply_role_change` | Governor |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ft_01_access_registry::prelude::*;
//!
//! let mut registry = AccessRegistry::new(owner.clone(), governor, RegistryLimits::default());
//! registry.add_guardian(&CallContext::new(owner, 1), Principal::new("wallet_1"))?;
//! assert!(registry.is_guardian(&Principal::new("wallet_1")));
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod domain;
pub mod error;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::access::RegistryOperation;
    pub use crate::domain::state::{RegistryLimits, RegistryState};
    pub use crate::error::{RegistryError, RegistryResult};
    pub use crate::service::AccessRegistry;
    pub use shared_types::{CallContext, Principal, Role, RoleOracle, RoleTag};
}

pub use domain::access::RegistryOperation;
pub use domain::state::{RegistryLimits, RegistryState};
pub use error::{RegistryError, RegistryResult};
pub use service::AccessRegistry;

/// Module ID used in error codes and logs.
pub const MODULE_ID: u8 = 1;

/// Module name.
pub const MODULE_NAME: &str = "access-registry";

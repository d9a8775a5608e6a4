//! # FT-05 Role-Change Governance
//!
//! Multi-signer proposal/approval workflow. It is the only path allowed to
//! move the owner role or replace a guardian or approver in the access
//! registry.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Proposal ids strictly increase and are never reused | `service.rs` - `next_id` only advances on success |
//! | INVARIANT-2 | Executed proposals are immutable | `service.rs` - `AlreadyExecuted` |
//! | INVARIANT-3 | Approvals are a set; repeats are idempotent | `domain/proposal.rs` - `BTreeSet` |
//! | INVARIANT-4 | The proposer is not an implicit approver | `domain/proposal.rs` - empty set on creation |
//! | INVARIANT-5 | Final approval and registry change are one atomic step | `service.rs` - registry applied before commit |
//!
//! ## Access Table
//!
//! | Operation | Allowed Roles |
//! |-----------|---------------|
//! | `add_approver` / `remove_approver` | Owner |
//! | `propose_signer_change` | Owner, Approver |
//! | `approve_proposal` | Owner, Approver |
//! | `get_proposal` | Any |
//!
//! ## Architecture
//!
//! ```text
//! RoleChangeGovernor ──RoleAuthority (outbound port)──→ AccessRegistry adapter
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::config::GovernorConfig;
    pub use crate::domain::proposal::{ProposalStatus, SignerChangeProposal};
    pub use crate::error::{GovernanceError, GovernanceResult};
    pub use crate::ports::RoleAuthority;
    pub use crate::service::{ApprovalOutcome, RoleChangeGovernor};
}

pub use domain::access::GovernanceOperation;
pub use domain::config::{GovernorConfig, DEFAULT_APPROVAL_THRESHOLD};
pub use domain::proposal::{ProposalStatus, SignerChangeProposal};
pub use error::{GovernanceError, GovernanceResult};
pub use ports::RoleAuthority;
pub use service::{ApprovalOutcome, RoleChangeGovernor};

/// Module ID used in error codes and logs.
pub const MODULE_ID: u8 = 5;

/// Module name.
pub const MODULE_NAME: &str = "role-governance";

//! # Role-Based Authorization
//!
//! The **single, authoritative implementation** of caller authorization for
//! every guard module.
//!
//! Each module declares a closed enum of its mutating operations and, for
//! each one, the set of roles allowed to invoke it (its access table). The
//! check is a pure lookup against a `RoleOracle`, performed inside the same
//! operation that then mutates state, so there is no window between the
//! check and the action it gates.
//!
//! ## Role Hierarchy
//!
//! ```text
//! Owner ──implicitly passes──→ Guardian checks
//!   │
//!   └────implicitly passes──→ Approver checks
//!
//! Governor ── only the role-change execution path (never a human caller)
//! ```

use crate::entities::Principal;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ROLES
// =============================================================================

/// A role that can appear in an access table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The single owner of the deployment.
    Owner,
    /// Emergency role: may pause and quarantine.
    Guardian,
    /// May propose and approve role changes.
    Approver,
    /// The role-change governor's execution identity.
    Governor,
    /// Any caller.
    Any,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Owner => "owner",
            Self::Guardian => "guardian",
            Self::Approver => "approver",
            Self::Governor => "governor",
            Self::Any => "any",
        };
        f.write_str(label)
    }
}

/// The role a signer-change proposal targets.
///
/// `Owner` replaces the owner outright; the member variants replace the
/// named member of the guardian or approver set with the proposed signer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleTag {
    /// The owner/signer role.
    Owner,
    /// Replace this guardian.
    Guardian(Principal),
    /// Replace this approver.
    Approver(Principal),
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => f.write_str("owner"),
            Self::Guardian(p) => write!(f, "guardian:{p}"),
            Self::Approver(p) => write!(f, "approver:{p}"),
        }
    }
}

// =============================================================================
// ROLE ORACLE
// =============================================================================

/// Read-only role membership queries.
///
/// Implemented by the access registry; every other module depends on this
/// trait rather than on the registry's storage.
pub trait RoleOracle {
    /// The current owner.
    fn owner(&self) -> &Principal;

    /// The governor execution identity.
    fn governor(&self) -> &Principal;

    /// True if `who` is an explicit guardian (owner not included).
    fn is_guardian_member(&self, who: &Principal) -> bool;

    /// True if `who` is an explicit approver (owner not included).
    fn is_approver_member(&self, who: &Principal) -> bool;

    /// True if `who` is the owner.
    fn is_owner(&self, who: &Principal) -> bool {
        self.owner() == who
    }

    /// True if `who` is the governor execution identity.
    fn is_governor(&self, who: &Principal) -> bool {
        self.governor() == who
    }

    /// Guardian check; the owner passes implicitly.
    fn is_guardian(&self, who: &Principal) -> bool {
        self.is_owner(who) || self.is_guardian_member(who)
    }

    /// Approver check; the owner passes implicitly.
    fn is_approver(&self, who: &Principal) -> bool {
        self.is_owner(who) || self.is_approver_member(who)
    }

    /// True if `who` holds `role`.
    fn has_role(&self, who: &Principal, role: Role) -> bool {
        match role {
            Role::Owner => self.is_owner(who),
            Role::Guardian => self.is_guardian(who),
            Role::Approver => self.is_approver(who),
            Role::Governor => self.is_governor(who),
            Role::Any => true,
        }
    }
}

// =============================================================================
// ACCESS TABLES
// =============================================================================

/// A member of a module's closed set of gated operations.
pub trait GuardedOperation: Copy {
    /// Stable operation name for logs and audit events.
    fn name(self) -> &'static str;

    /// Roles allowed to invoke the operation. A caller holding any one of
    /// them is authorized.
    fn allowed_roles(self) -> &'static [Role];
}

/// Check `caller` against the access table entry for `op`.
pub fn authorize<O, R>(oracle: &R, caller: &Principal, op: O) -> bool
where
    O: GuardedOperation,
    R: RoleOracle + ?Sized,
{
    op.allowed_roles()
        .iter()
        .any(|role| oracle.has_role(caller, *role))
}

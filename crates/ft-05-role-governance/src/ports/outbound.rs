//! Driven Ports (Outbound Dependencies)
//!
//! The governor never touches registry storage. Everything it needs from
//! the access registry goes through `RoleAuthority`.

use ft_01_access_registry::RegistryResult;
use shared_types::{CallContext, Principal, RoleOracle, RoleTag};

/// The registry as seen by the governor.
pub trait RoleAuthority: RoleOracle {
    /// Check a role change's target without a caller gate (proposal time).
    fn validate_target(&self, target_role: &RoleTag) -> RegistryResult<()>;

    /// Apply an executed role change as `ctx.caller`, validating first.
    /// On `Err` nothing changed.
    fn apply_role_change(
        &mut self,
        ctx: &CallContext,
        target_role: &RoleTag,
        new_signer: Principal,
    ) -> RegistryResult<()>;

    /// Owner-only approver membership.
    fn add_approver(&mut self, ctx: &CallContext, approver: Principal) -> RegistryResult<()>;

    /// Owner-only approver membership.
    fn remove_approver(&mut self, ctx: &CallContext, approver: &Principal) -> RegistryResult<()>;
}

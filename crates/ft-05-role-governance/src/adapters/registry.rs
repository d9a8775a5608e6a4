//! `RoleAuthority` backed by the in-process `AccessRegistry`.

use crate::ports::outbound::RoleAuthority;
use ft_01_access_registry::{AccessRegistry, RegistryResult};
use shared_types::{CallContext, Principal, RoleTag};

impl RoleAuthority for AccessRegistry {
    fn validate_target(&self, target_role: &RoleTag) -> RegistryResult<()> {
        AccessRegistry::validate_target(self, target_role)
    }

    fn apply_role_change(
        &mut self,
        ctx: &CallContext,
        target_role: &RoleTag,
        new_signer: Principal,
    ) -> RegistryResult<()> {
        AccessRegistry::apply_role_change(self, ctx, target_role, new_signer)
    }

    fn add_approver(&mut self, ctx: &CallContext, approver: Principal) -> RegistryResult<()> {
        AccessRegistry::add_approver(self, ctx, approver)
    }

    fn remove_approver(&mut self, ctx: &CallContext, approver: &Principal) -> RegistryResult<()> {
        AccessRegistry::remove_approver(self, ctx, approver)
    }
}

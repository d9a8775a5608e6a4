//! # Access Registry Service
//!
//! Owns the registry state. Every mutation authorizes the caller against
//! the access table, validates, and only then commits and queues an audit
//! event.

use crate::domain::access::RegistryOperation;
use crate::domain::state::{RegistryLimits, RegistryState};
use crate::error::{RegistryError, RegistryResult};
use shared_bus::GuardEvent;
use shared_types::{authorize, CallContext, GuardedOperation, Principal, Role, RoleOracle, RoleTag};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// The access registry.
#[derive(Debug)]
pub struct AccessRegistry {
    state: RegistryState,
    /// Identity the role-change governor executes as.
    governor: Principal,
    limits: RegistryLimits,
    /// Events committed but not yet drained by the composition root.
    pending_events: Vec<GuardEvent>,
}

impl AccessRegistry {
    /// Create a registry with `owner` as the sole principal.
    pub fn new(owner: Principal, governor: Principal, limits: RegistryLimits) -> Self {
        Self {
            state: RegistryState::new(owner),
            governor,
            limits,
            pending_events: Vec::new(),
        }
    }

    /// Current persisted state.
    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    /// Explicit guardians, in principal order.
    pub fn guardians(&self) -> impl Iterator<Item = &Principal> {
        self.state.guardians.iter()
    }

    /// Explicit approvers, in principal order.
    pub fn approvers(&self) -> impl Iterator<Item = &Principal> {
        self.state.approvers.iter()
    }

    /// Configured limits.
    pub fn limits(&self) -> &RegistryLimits {
        &self.limits
    }

    /// Take and clear pending events.
    pub fn take_events(&mut self) -> Vec<GuardEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // =========================================================================
    // MEMBERSHIP (owner-only)
    // =========================================================================

    /// Add a guardian. Re-adding an existing guardian is a no-op.
    pub fn add_guardian(&mut self, ctx: &CallContext, guardian: Principal) -> RegistryResult<()> {
        self.check(ctx, RegistryOperation::AddGuardian)?;
        let inserted = insert_bounded(
            &mut self.state.guardians,
            guardian.clone(),
            Role::Guardian,
            self.limits.max_guardians,
        )?;
        if inserted {
            info!(guardian = %guardian, block_height = ctx.block_height, "Guardian added");
            self.pending_events.push(GuardEvent::GuardianAdded {
                guardian,
                by: ctx.caller.clone(),
                block_height: ctx.block_height,
            });
        }
        Ok(())
    }

    /// Remove a guardian. Removing a non-member is a no-op.
    pub fn remove_guardian(
        &mut self,
        ctx: &CallContext,
        guardian: &Principal,
    ) -> RegistryResult<()> {
        self.check(ctx, RegistryOperation::RemoveGuardian)?;
        if self.state.guardians.remove(guardian) {
            info!(guardian = %guardian, block_height = ctx.block_height, "Guardian removed");
            self.pending_events.push(GuardEvent::GuardianRemoved {
                guardian: guardian.clone(),
                by: ctx.caller.clone(),
                block_height: ctx.block_height,
            });
        }
        Ok(())
    }

    /// Add an approver. Re-adding an existing approver is a no-op.
    pub fn add_approver(&mut self, ctx: &CallContext, approver: Principal) -> RegistryResult<()> {
        self.check(ctx, RegistryOperation::AddApprover)?;
        let inserted = insert_bounded(
            &mut self.state.approvers,
            approver.clone(),
            Role::Approver,
            self.limits.max_approvers,
        )?;
        if inserted {
            info!(approver = %approver, block_height = ctx.block_height, "Approver added");
            self.pending_events.push(GuardEvent::ApproverAdded {
                approver,
                by: ctx.caller.clone(),
                block_height: ctx.block_height,
            });
        }
        Ok(())
    }

    /// Remove an approver. Removing a non-member is a no-op.
    pub fn remove_approver(
        &mut self,
        ctx: &CallContext,
        approver: &Principal,
    ) -> RegistryResult<()> {
        self.check(ctx, RegistryOperation::RemoveApprover)?;
        if self.state.approvers.remove(approver) {
            info!(approver = %approver, block_height = ctx.block_height, "Approver removed");
            self.pending_events.push(GuardEvent::ApproverRemoved {
                approver: approver.clone(),
                by: ctx.caller.clone(),
                block_height: ctx.block_height,
            });
        }
        Ok(())
    }

    // =========================================================================
    // ROLE CHANGES (governor-only)
    // =========================================================================

    /// Move the owner role to `new_owner`.
    ///
    /// Only the governor identity may call this; the current owner calling
    /// it directly fails with `Unauthorized`.
    pub fn set_owner(&mut self, ctx: &CallContext, new_owner: Principal) -> RegistryResult<()> {
        self.check(ctx, RegistryOperation::SetOwner)?;
        self.commit_owner(ctx, new_owner);
        Ok(())
    }

    /// Check that `apply_role_change` would succeed, without mutating.
    pub fn validate_role_change(
        &self,
        ctx: &CallContext,
        target_role: &RoleTag,
    ) -> RegistryResult<()> {
        let op = match target_role {
            RoleTag::Owner => RegistryOperation::SetOwner,
            RoleTag::Guardian(_) | RoleTag::Approver(_) => RegistryOperation::ReplaceMember,
        };
        self.check(ctx, op)?;
        self.validate_target(target_role)
    }

    /// Same as `validate_role_change` minus the caller check; used when a
    /// proposal is created, long before the governor executes it.
    pub fn validate_target(&self, target_role: &RoleTag) -> RegistryResult<()> {
        match target_role {
            RoleTag::Owner => Ok(()),
            RoleTag::Guardian(previous) => {
                require_member(&self.state.guardians, previous, Role::Guardian)
            }
            RoleTag::Approver(previous) => {
                require_member(&self.state.approvers, previous, Role::Approver)
            }
        }
    }

    /// Apply an executed proposal's role change.
    pub fn apply_role_change(
        &mut self,
        ctx: &CallContext,
        target_role: &RoleTag,
        new_signer: Principal,
    ) -> RegistryResult<()> {
        self.validate_role_change(ctx, target_role)?;

        match target_role {
            RoleTag::Owner => self.commit_owner(ctx, new_signer),
            RoleTag::Guardian(previous) => {
                replace_member(&mut self.state.guardians, previous, new_signer.clone());
                self.commit_replacement(ctx, Role::Guardian, previous, new_signer);
            }
            RoleTag::Approver(previous) => {
                replace_member(&mut self.state.approvers, previous, new_signer.clone());
                self.commit_replacement(ctx, Role::Approver, previous, new_signer);
            }
        }
        Ok(())
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn check(&self, ctx: &CallContext, op: RegistryOperation) -> RegistryResult<()> {
        if authorize(self, &ctx.caller, op) {
            return Ok(());
        }
        warn!(
            caller = %ctx.caller,
            operation = op.name(),
            block_height = ctx.block_height,
            "Unauthorized registry operation"
        );
        Err(RegistryError::Unauthorized {
            caller: ctx.caller.clone(),
            operation: op.name(),
        })
    }

    fn commit_owner(&mut self, ctx: &CallContext, new_owner: Principal) {
        let previous = std::mem::replace(&mut self.state.owner, new_owner.clone());
        info!(
            previous = %previous,
            new_owner = %new_owner,
            block_height = ctx.block_height,
            "Owner changed"
        );
        self.pending_events.push(GuardEvent::OwnerChanged {
            previous,
            new_owner,
            block_height: ctx.block_height,
        });
    }

    fn commit_replacement(
        &mut self,
        ctx: &CallContext,
        role: Role,
        previous: &Principal,
        replacement: Principal,
    ) {
        info!(
            role = %role,
            previous = %previous,
            replacement = %replacement,
            block_height = ctx.block_height,
            "Role member replaced"
        );
        self.pending_events.push(GuardEvent::RoleMemberReplaced {
            role,
            previous: previous.clone(),
            replacement,
            block_height: ctx.block_height,
        });
    }
}

impl RoleOracle for AccessRegistry {
    fn owner(&self) -> &Principal {
        &self.state.owner
    }

    fn governor(&self) -> &Principal {
        &self.governor
    }

    fn is_guardian_member(&self, who: &Principal) -> bool {
        self.state.guardians.contains(who)
    }

    fn is_approver_member(&self, who: &Principal) -> bool {
        self.state.approvers.contains(who)
    }
}

/// Insert unless the set is full. Returns whether the set changed.
fn insert_bounded(
    set: &mut BTreeSet<Principal>,
    member: Principal,
    role: Role,
    max: usize,
) -> RegistryResult<bool> {
    if set.contains(&member) {
        return Ok(false);
    }
    if set.len() >= max {
        return Err(RegistryError::CapacityExceeded { role, max });
    }
    Ok(set.insert(member))
}

fn require_member(set: &BTreeSet<Principal>, previous: &Principal, role: Role) -> RegistryResult<()> {
    if set.contains(previous) {
        Ok(())
    } else {
        Err(RegistryError::NotAMember {
            role,
            member: previous.clone(),
        })
    }
}

// A swap never grows the set; no capacity check.
fn replace_member(set: &mut BTreeSet<Principal>, previous: &Principal, replacement: Principal) {
    set.remove(previous);
    set.insert(replacement);
}

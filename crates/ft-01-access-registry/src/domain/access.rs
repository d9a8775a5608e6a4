//! Access table for registry mutations.

use shared_types::{GuardedOperation, Role};

/// Every mutating registry operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryOperation {
    /// Insert into the guardian set.
    AddGuardian,
    /// Remove from the guardian set.
    RemoveGuardian,
    /// Insert into the approver set.
    AddApprover,
    /// Remove from the approver set.
    RemoveApprover,
    /// Move the owner role.
    SetOwner,
    /// Replace a guardian or approver member.
    ReplaceMember,
}

impl GuardedOperation for RegistryOperation {
    fn name(self) -> &'static str {
        match self {
            Self::AddGuardian => "add_guardian",
            Self::RemoveGuardian => "remove_guardian",
            Self::AddApprover => "add_approver",
            Self::RemoveApprover => "remove_approver",
            Self::SetOwner => "set_owner",
            Self::ReplaceMember => "replace_member",
        }
    }

    fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::AddGuardian | Self::RemoveGuardian | Self::AddApprover | Self::RemoveApprover => {
                &[Role::Owner]
            }
            Self::SetOwner | Self::ReplaceMember => &[Role::Governor],
        }
    }
}

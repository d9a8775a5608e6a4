//! Access table for governance operations.

use shared_types::{GuardedOperation, Role};

/// Every gated governance operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GovernanceOperation {
    /// Add an approver (delegated to the registry).
    AddApprover,
    /// Remove an approver (delegated to the registry).
    RemoveApprover,
    /// Open a signer-change proposal.
    Propose,
    /// Approve an open proposal.
    Approve,
}

impl GuardedOperation for GovernanceOperation {
    fn name(self) -> &'static str {
        match self {
            Self::AddApprover => "add_approver",
            Self::RemoveApprover => "remove_approver",
            Self::Propose => "propose_signer_change",
            Self::Approve => "approve_proposal",
        }
    }

    fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::AddApprover | Self::RemoveApprover => &[Role::Owner],
            // The owner passes approver checks implicitly.
            Self::Propose | Self::Approve => &[Role::Approver],
        }
    }
}

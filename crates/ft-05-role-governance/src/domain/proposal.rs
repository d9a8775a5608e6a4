//! Signer-change proposals.
//!
//! ```text
//! [OPEN {approvals}] ──approve (count < threshold)──→ [OPEN {approvals + caller}]
//!         │
//!         └──approve (count >= threshold)──→ [EXECUTED] (terminal, immutable)
//! ```
//!
//! There is no rejected state: a proposal that never gathers enough
//! approvals stays open.

use serde::{Deserialize, Serialize};
use shared_types::{BlockHeight, Principal, ProposalId, RoleTag};
use std::collections::BTreeSet;

/// Lifecycle of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Collecting approvals.
    Open,
    /// The role change was applied.
    Executed,
}

/// A request to move a role to a new signer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerChangeProposal {
    /// Monotonic, never reused.
    pub id: ProposalId,
    /// Role being changed.
    pub target_role: RoleTag,
    /// Principal that receives the role.
    pub proposed_signer: Principal,
    /// Who opened the proposal. Not counted as an approval.
    pub proposer: Principal,
    /// Distinct approvers so far.
    pub approvals: BTreeSet<Principal>,
    /// Block the proposal was opened at.
    pub created_at_block: BlockHeight,
    /// Set once, when the threshold is reached.
    pub executed: bool,
    /// Block of execution, if executed.
    pub executed_at_block: Option<BlockHeight>,
}

impl SignerChangeProposal {
    /// A fresh proposal with no approvals.
    pub fn new(
        id: ProposalId,
        target_role: RoleTag,
        proposed_signer: Principal,
        proposer: Principal,
        created_at_block: BlockHeight,
    ) -> Self {
        Self {
            id,
            target_role,
            proposed_signer,
            proposer,
            approvals: BTreeSet::new(),
            created_at_block,
            executed: false,
            executed_at_block: None,
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else {
            ProposalStatus::Open
        }
    }

    /// Number of distinct approvals.
    #[must_use]
    pub fn approval_count(&self) -> usize {
        self.approvals.len()
    }

    /// True if `who` has approved.
    #[must_use]
    pub fn has_approved(&self, who: &Principal) -> bool {
        self.approvals.contains(who)
    }

    /// Approval count after `who` approves, without mutating.
    ///
    /// Earlier approvers only count while `still_approver` holds for them;
    /// the recorded set itself is never pruned.
    #[must_use]
    pub fn approvals_with<F>(&self, who: &Principal, still_approver: F) -> usize
    where
        F: Fn(&Principal) -> bool,
    {
        let earlier = self
            .approvals
            .iter()
            .filter(|p| *p != who && still_approver(p))
            .count();
        earlier + 1
    }
}

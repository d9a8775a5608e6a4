//! # Role-Change Governor Service
//!
//! The only path that can move the owner role or replace a guardian or
//! approver. Proposals execute when their approval count reaches the
//! configured threshold; execution and the final approval are one atomic
//! step.

use crate::domain::access::GovernanceOperation;
use crate::domain::config::GovernorConfig;
use crate::domain::proposal::SignerChangeProposal;
use crate::error::{GovernanceError, GovernanceResult};
use crate::ports::outbound::RoleAuthority;
use serde::{Deserialize, Serialize};
use shared_bus::GuardEvent;
use shared_types::{authorize, CallContext, GuardedOperation, Principal, ProposalId, RoleTag};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Result of an approval call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalOutcome {
    /// Distinct approvals after this call.
    pub approvals: usize,
    /// True if this call executed the proposal.
    pub executed: bool,
}

/// Multi-signer role-change governor.
#[derive(Debug, Default)]
pub struct RoleChangeGovernor {
    proposals: BTreeMap<ProposalId, SignerChangeProposal>,
    /// Next id to allocate. Only ever increases.
    next_id: ProposalId,
    config: GovernorConfig,
    pending_events: Vec<GuardEvent>,
}

impl RoleChangeGovernor {
    /// A governor with no proposals.
    pub fn new(config: GovernorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }

    /// Take and clear pending events.
    pub fn take_events(&mut self) -> Vec<GuardEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Look up a proposal.
    pub fn get_proposal(&self, id: ProposalId) -> Option<&SignerChangeProposal> {
        let proposal = self.proposals.get(&id);
        debug!(id, found = proposal.is_some(), "Proposal lookup");
        proposal
    }

    /// Total proposals ever created.
    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// The id the next successful proposal will get.
    pub fn next_proposal_id(&self) -> ProposalId {
        self.next_id
    }

    /// Proposals still collecting approvals, in id order.
    pub fn open_proposals(&self) -> impl Iterator<Item = &SignerChangeProposal> {
        self.proposals.values().filter(|p| !p.executed)
    }

    // =========================================================================
    // APPROVER MEMBERSHIP
    // =========================================================================

    /// Add an approver through the registry. Owner only.
    pub fn add_approver<A: RoleAuthority + ?Sized>(
        &self,
        authority: &mut A,
        ctx: &CallContext,
        approver: Principal,
    ) -> GovernanceResult<()> {
        check(authority, ctx, GovernanceOperation::AddApprover)?;
        authority.add_approver(ctx, approver)?;
        Ok(())
    }

    /// Remove an approver through the registry. Owner only.
    pub fn remove_approver<A: RoleAuthority + ?Sized>(
        &self,
        authority: &mut A,
        ctx: &CallContext,
        approver: &Principal,
    ) -> GovernanceResult<()> {
        check(authority, ctx, GovernanceOperation::RemoveApprover)?;
        authority.remove_approver(ctx, approver)?;
        Ok(())
    }

    // =========================================================================
    // PROPOSALS
    // =========================================================================

    /// Open a proposal to give `target_role` to `new_signer`.
    ///
    /// The proposer's approval is not counted; they must call
    /// `approve_proposal` like everyone else. A rejected proposal does not
    /// consume an id.
    pub fn propose_signer_change<A: RoleAuthority + ?Sized>(
        &mut self,
        authority: &A,
        ctx: &CallContext,
        target_role: RoleTag,
        new_signer: Principal,
    ) -> GovernanceResult<ProposalId> {
        check(authority, ctx, GovernanceOperation::Propose)?;
        authority.validate_target(&target_role)?;

        let id = self.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or(GovernanceError::ProposalIdsExhausted)?;

        self.proposals.insert(
            id,
            SignerChangeProposal::new(
                id,
                target_role.clone(),
                new_signer.clone(),
                ctx.caller.clone(),
                ctx.block_height,
            ),
        );
        self.next_id = next_id;

        info!(
            id,
            target_role = %target_role,
            proposed_signer = %new_signer,
            proposer = %ctx.caller,
            block_height = ctx.block_height,
            "Signer change proposed"
        );
        self.pending_events.push(GuardEvent::ProposalCreated {
            id,
            target_role,
            proposed_signer: new_signer,
            proposer: ctx.caller.clone(),
            block_height: ctx.block_height,
        });
        Ok(id)
    }

    /// Approve proposal `id`, executing it if the threshold is reached.
    ///
    /// Approving twice is idempotent. If execution is due, the registry
    /// change is applied (as the governor identity) before anything is
    /// recorded here, so a rejected change leaves the proposal untouched.
    pub fn approve_proposal<A: RoleAuthority + ?Sized>(
        &mut self,
        authority: &mut A,
        ctx: &CallContext,
        id: ProposalId,
    ) -> GovernanceResult<ApprovalOutcome> {
        check(authority, ctx, GovernanceOperation::Approve)?;

        let proposal = self
            .proposals
            .get(&id)
            .ok_or(GovernanceError::ProposalNotFound { id })?;
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted { id });
        }

        // Votes from principals who have since lost the approver role lapse.
        let approvals = proposal.approvals_with(&ctx.caller, |p| authority.is_approver(p));
        let newly_approved = !proposal.has_approved(&ctx.caller);
        let executes = approvals >= self.config.approval_threshold;

        if executes {
            let governor_ctx = CallContext::new(authority.governor().clone(), ctx.block_height);
            authority.apply_role_change(
                &governor_ctx,
                &proposal.target_role,
                proposal.proposed_signer.clone(),
            )?;
        }

        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound { id })?;
        proposal.approvals.insert(ctx.caller.clone());

        if newly_approved {
            info!(id, approver = %ctx.caller, approvals, block_height = ctx.block_height, "Proposal approved");
            self.pending_events.push(GuardEvent::ProposalApproved {
                id,
                approver: ctx.caller.clone(),
                approvals,
                block_height: ctx.block_height,
            });
        }

        if executes {
            proposal.executed = true;
            proposal.executed_at_block = Some(ctx.block_height);
            info!(
                id,
                target_role = %proposal.target_role,
                new_signer = %proposal.proposed_signer,
                block_height = ctx.block_height,
                "Proposal executed"
            );
            self.pending_events.push(GuardEvent::ProposalExecuted {
                id,
                target_role: proposal.target_role.clone(),
                new_signer: proposal.proposed_signer.clone(),
                block_height: ctx.block_height,
            });
        }

        Ok(ApprovalOutcome {
            approvals,
            executed: executes,
        })
    }
}

fn check<A: RoleAuthority + ?Sized>(
    authority: &A,
    ctx: &CallContext,
    op: GovernanceOperation,
) -> GovernanceResult<()> {
    if authorize(authority, &ctx.caller, op) {
        return Ok(());
    }
    warn!(
        caller = %ctx.caller,
        operation = op.name(),
        block_height = ctx.block_height,
        "Unauthorized governance operation"
    );
    Err(GovernanceError::Unauthorized {
        caller: ctx.caller.clone(),
        operation: op.name(),
    })
}

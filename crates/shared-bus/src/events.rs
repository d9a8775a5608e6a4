//! # Guard Events
//!
//! Audit events emitted by the guard modules after a committed state change.
//! A failed operation never emits an event (the one exception is
//! `TransferRejected`, which records a veto by the transfer pipeline).

use serde::{Deserialize, Serialize};
use shared_types::entities::{Amount, BlockHeight, FilterMode, Principal, ProposalId};
use shared_types::security::{Role, RoleTag};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardEvent {
    // =========================================================================
    // ACCESS REGISTRY
    // =========================================================================
    /// A guardian was added.
    GuardianAdded {
        guardian: Principal,
        by: Principal,
        block_height: BlockHeight,
    },

    /// A guardian was removed.
    GuardianRemoved {
        guardian: Principal,
        by: Principal,
        block_height: BlockHeight,
    },

    /// An approver was added.
    ApproverAdded {
        approver: Principal,
        by: Principal,
        block_height: BlockHeight,
    },

    /// An approver was removed.
    ApproverRemoved {
        approver: Principal,
        by: Principal,
        block_height: BlockHeight,
    },

    /// The owner role moved to a new principal.
    /// Only ever emitted on the role-change execution path.
    OwnerChanged {
        previous: Principal,
        new_owner: Principal,
        block_height: BlockHeight,
    },

    /// A guardian or approver was replaced by an executed proposal.
    RoleMemberReplaced {
        role: Role,
        previous: Principal,
        replacement: Principal,
        block_height: BlockHeight,
    },

    // =========================================================================
    // CIRCUIT BREAKER
    // =========================================================================
    /// All guarded activity was paused.
    Paused {
        by: Principal,
        block_height: BlockHeight,
    },

    /// The breaker returned to `Active`, clearing any staged record.
    Unpaused {
        by: Principal,
        block_height: BlockHeight,
    },

    /// A delayed, rate-limited unpause was scheduled.
    StagedUnpauseScheduled {
        by: Principal,
        activation_block: BlockHeight,
        rate_cap: Amount,
        block_height: BlockHeight,
    },

    // =========================================================================
    // SPEND GUARD
    // =========================================================================
    /// The spend cap was (re)configured and the window reset.
    SpendCapSet {
        cap_amount: Amount,
        period_blocks: BlockHeight,
        by: Principal,
        block_height: BlockHeight,
    },

    /// The recipient filter mode changed.
    FilterModeChanged {
        mode: FilterMode,
        by: Principal,
        block_height: BlockHeight,
    },

    /// A recipient joined the allow set.
    RecipientAllowed {
        recipient: Principal,
        by: Principal,
        block_height: BlockHeight,
    },

    /// A recipient joined the deny set.
    RecipientDenied {
        recipient: Principal,
        by: Principal,
        block_height: BlockHeight,
    },

    /// A recipient left the allow set (`from_allow_list`) or the deny set.
    RecipientUnlisted {
        recipient: Principal,
        from_allow_list: bool,
        by: Principal,
        block_height: BlockHeight,
    },

    /// Spend was recorded against the current window.
    SpendRecorded {
        amount: Amount,
        spent_in_window: Amount,
        window_start_block: BlockHeight,
        block_height: BlockHeight,
    },

    // =========================================================================
    // QUARANTINE
    // =========================================================================
    /// A recipient was quarantined (or its entry overwritten).
    RecipientQuarantined {
        recipient: Principal,
        reason: String,
        severity: u8,
        overwritten: bool,
        by: Principal,
        block_height: BlockHeight,
    },

    /// A quarantine entry was removed.
    QuarantineCleared {
        recipient: Principal,
        by: Principal,
        block_height: BlockHeight,
    },

    // =========================================================================
    // ROLE-CHANGE GOVERNANCE
    // =========================================================================
    /// A signer-change proposal was created.
    ProposalCreated {
        id: ProposalId,
        target_role: RoleTag,
        proposed_signer: Principal,
        proposer: Principal,
        block_height: BlockHeight,
    },

    /// An approval was recorded on a proposal.
    ProposalApproved {
        id: ProposalId,
        approver: Principal,
        approvals: usize,
        block_height: BlockHeight,
    },

    /// A proposal reached its threshold and the role change was applied.
    ProposalExecuted {
        id: ProposalId,
        target_role: RoleTag,
        new_signer: Principal,
        block_height: BlockHeight,
    },

    // =========================================================================
    // TRANSFER PIPELINE
    // =========================================================================
    /// A guarded transfer passed every guard and its spend was recorded.
    TransferAuthorized {
        recipient: Principal,
        amount: Amount,
        by: Principal,
        block_height: BlockHeight,
    },

    /// A guarded transfer was vetoed.
    TransferRejected {
        recipient: Principal,
        amount: Amount,
        by: Principal,
        reason_code: u32,
        block_height: BlockHeight,
    },
}

impl GuardEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::GuardianAdded { .. }
            | Self::GuardianRemoved { .. }
            | Self::ApproverAdded { .. }
            | Self::ApproverRemoved { .. }
            | Self::OwnerChanged { .. }
            | Self::RoleMemberReplaced { .. } => EventTopic::Access,
            Self::Paused { .. } | Self::Unpaused { .. } | Self::StagedUnpauseScheduled { .. } => {
                EventTopic::CircuitBreaker
            }
            Self::SpendCapSet { .. }
            | Self::FilterModeChanged { .. }
            | Self::RecipientAllowed { .. }
            | Self::RecipientDenied { .. }
            | Self::RecipientUnlisted { .. }
            | Self::SpendRecorded { .. } => EventTopic::SpendGuard,
            Self::RecipientQuarantined { .. } | Self::QuarantineCleared { .. } => {
                EventTopic::Quarantine
            }
            Self::ProposalCreated { .. }
            | Self::ProposalApproved { .. }
            | Self::ProposalExecuted { .. } => EventTopic::Governance,
            Self::TransferAuthorized { .. } | Self::TransferRejected { .. } => {
                EventTopic::Transfers
            }
        }
    }

    /// Block at which the event was committed.
    #[must_use]
    pub fn block_height(&self) -> BlockHeight {
        match self {
            Self::GuardianAdded { block_height, .. }
            | Self::GuardianRemoved { block_height, .. }
            | Self::ApproverAdded { block_height, .. }
            | Self::ApproverRemoved { block_height, .. }
            | Self::OwnerChanged { block_height, .. }
            | Self::RoleMemberReplaced { block_height, .. }
            | Self::Paused { block_height, .. }
            | Self::Unpaused { block_height, .. }
            | Self::StagedUnpauseScheduled { block_height, .. }
            | Self::SpendCapSet { block_height, .. }
            | Self::FilterModeChanged { block_height, .. }
            | Self::RecipientAllowed { block_height, .. }
            | Self::RecipientDenied { block_height, .. }
            | Self::RecipientUnlisted { block_height, .. }
            | Self::SpendRecorded { block_height, .. }
            | Self::RecipientQuarantined { block_height, .. }
            | Self::QuarantineCleared { block_height, .. }
            | Self::ProposalCreated { block_height, .. }
            | Self::ProposalApproved { block_height, .. }
            | Self::ProposalExecuted { block_height, .. }
            | Self::TransferAuthorized { block_height, .. }
            | Self::TransferRejected { block_height, .. } => *block_height,
        }
    }

    /// Name of the module that emitted the event.
    #[must_use]
    pub fn source_module(&self) -> &'static str {
        self.topic().module_name()
    }
}

/// Event topics for filtering subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Access registry membership changes.
    Access,
    /// Pause state transitions.
    CircuitBreaker,
    /// Spend cap and recipient filter changes.
    SpendGuard,
    /// Quarantine flags.
    Quarantine,
    /// Role-change proposals.
    Governance,
    /// Guarded transfer decisions.
    Transfers,
    /// All topics (wildcard).
    All,
}

impl EventTopic {
    /// Module name used in log fields.
    #[must_use]
    pub fn module_name(self) -> &'static str {
        match self {
            Self::Access => "access-registry",
            Self::CircuitBreaker => "circuit-breaker",
            Self::SpendGuard => "spend-guard",
            Self::Quarantine => "quarantine",
            Self::Governance => "role-governance",
            Self::Transfers => "fortifier",
            Self::All => "all",
        }
    }
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &GuardEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}

//! Access table for spend guard mutations.
//!
//! Every administrative mutation is owner-only. Spend recording is not in
//! this table: it is the transfer pipeline's step, not an admin action.

use shared_types::{GuardedOperation, Role};

/// Every gated spend guard operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpendGuardOperation {
    /// Configure cap and period.
    SetSpendCap,
    /// Change the recipient filter mode.
    SetFilterMode,
    /// Insert into the allow set.
    AllowRecipient,
    /// Insert into the deny set.
    DenyRecipient,
    /// Remove from either set.
    UnlistRecipient,
}

impl GuardedOperation for SpendGuardOperation {
    fn name(self) -> &'static str {
        match self {
            Self::SetSpendCap => "set_spend_cap",
            Self::SetFilterMode => "set_filter_mode",
            Self::AllowRecipient => "allow_recipient",
            Self::DenyRecipient => "deny_recipient",
            Self::UnlistRecipient => "unlist_recipient",
        }
    }

    fn allowed_roles(self) -> &'static [Role] {
        &[Role::Owner]
    }
}

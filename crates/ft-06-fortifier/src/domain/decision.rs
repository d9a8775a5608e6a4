//! Transfer pipeline outcomes.

use crate::error::FortifierError;
use ft_03_spend_guard::{SpendGuardError, SpendWindow};
use serde::{Deserialize, Serialize};
use shared_types::{Amount, BlockHeight, Principal};

/// Why a guard vetoed a transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Veto {
    /// The breaker reads as paused.
    Paused,
    /// Rate-limited breaker and the amount is over the ceiling.
    RateCapExceeded {
        /// Active per-operation ceiling.
        rate_cap: Amount,
    },
    /// Not enough room in the spend window.
    SpendCapExceeded,
    /// Allow-list miss.
    RecipientNotAllowed,
    /// Deny-list hit.
    RecipientDenied,
    /// Recipient is quarantined.
    RecipientQuarantined {
        /// Entry severity.
        severity: u8,
    },
}

impl Veto {
    /// Error equivalent of the veto.
    pub fn into_error(self, recipient: &Principal, amount: Amount) -> FortifierError {
        match self {
            Self::Paused => FortifierError::TransfersPaused,
            Self::RateCapExceeded { rate_cap } => {
                FortifierError::RateCapExceeded { amount, rate_cap }
            }
            Self::SpendCapExceeded => FortifierError::SpendCapExceeded { amount },
            Self::RecipientNotAllowed => FortifierError::RecipientNotAllowed {
                recipient: recipient.clone(),
            },
            Self::RecipientDenied => FortifierError::SpendGuard(SpendGuardError::DeniedRecipient {
                recipient: recipient.clone(),
            }),
            Self::RecipientQuarantined { severity } => FortifierError::RecipientQuarantined {
                recipient: recipient.clone(),
                severity,
            },
        }
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Paused => "paused",
            Self::RateCapExceeded { .. } => "rate_cap",
            Self::SpendCapExceeded => "spend_cap",
            Self::RecipientNotAllowed => "not_allowed",
            Self::RecipientDenied => "denied",
            Self::RecipientQuarantined { .. } => "quarantined",
        }
    }
}

/// Read-only verdict of the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferDecision {
    /// Every guard permits the transfer.
    Permitted {
        /// Ceiling applied by a rate-limited breaker, if any.
        rate_cap: Option<Amount>,
    },
    /// A guard vetoed it.
    Vetoed(Veto),
}

impl TransferDecision {
    /// True for `Permitted`.
    #[must_use]
    pub fn is_permitted(&self) -> bool {
        matches!(self, Self::Permitted { .. })
    }
}

/// Proof that a transfer was authorized and its spend recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Recipient.
    pub recipient: Principal,
    /// Amount recorded.
    pub amount: Amount,
    /// Block of authorization.
    pub block_height: BlockHeight,
    /// Spend window after recording; `None` when no cap is configured.
    pub window: Option<SpendWindow>,
    /// Ceiling applied by a rate-limited breaker, if any.
    pub rate_cap: Option<Amount>,
}

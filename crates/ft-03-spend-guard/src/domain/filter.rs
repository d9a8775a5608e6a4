//! Recipient allow/deny filter.

use crate::error::{SpendGuardError, SpendGuardResult};
use serde::{Deserialize, Serialize};
use shared_types::{FilterMode, Principal};
use std::collections::BTreeSet;

/// Bounds on the recipient lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendGuardLimits {
    /// Maximum entries in each of the allow and deny sets.
    pub max_list_entries: usize,
}

impl Default for SpendGuardLimits {
    fn default() -> Self {
        Self {
            max_list_entries: 256,
        }
    }
}

/// Mode plus both sets. The inactive set persists across mode switches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientFilter {
    /// Which set is consulted.
    pub mode: FilterMode,
    /// Consulted in `AllowList` mode.
    pub allowed: BTreeSet<Principal>,
    /// Consulted in `DenyList` mode.
    pub denied: BTreeSet<Principal>,
}

impl RecipientFilter {
    /// Evaluate `recipient` under the current mode.
    ///
    /// An allow-list miss is `Ok(false)`; a deny-list hit is a hard
    /// `DeniedRecipient` failure.
    pub fn check(&self, recipient: &Principal) -> SpendGuardResult<bool> {
        match self.mode {
            FilterMode::Disabled => Ok(true),
            FilterMode::AllowList => Ok(self.allowed.contains(recipient)),
            FilterMode::DenyList => {
                if self.denied.contains(recipient) {
                    Err(SpendGuardError::DeniedRecipient {
                        recipient: recipient.clone(),
                    })
                } else {
                    Ok(true)
                }
            }
        }
    }

    /// The allow set when `allow`, else the deny set.
    pub fn list(&self, allow: bool) -> &BTreeSet<Principal> {
        if allow {
            &self.allowed
        } else {
            &self.denied
        }
    }

    pub(crate) fn list_mut(&mut self, allow: bool) -> &mut BTreeSet<Principal> {
        if allow {
            &mut self.allowed
        } else {
            &mut self.denied
        }
    }
}

//! Registry state and its size limits.

use serde::{Deserialize, Serialize};
use shared_types::Principal;
use std::collections::BTreeSet;

/// Upper bounds on the role sets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryLimits {
    /// Maximum number of explicit guardians.
    pub max_guardians: usize,
    /// Maximum number of explicit approvers.
    pub max_approvers: usize,
}

impl Default for RegistryLimits {
    fn default() -> Self {
        Self {
            max_guardians: 32,
            max_approvers: 32,
        }
    }
}

/// Persisted registry record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryState {
    /// The single owner.
    pub owner: Principal,
    /// Explicit guardians (the owner is never required to be listed).
    pub guardians: BTreeSet<Principal>,
    /// Explicit approvers.
    pub approvers: BTreeSet<Principal>,
}

impl RegistryState {
    /// Fresh state with only an owner.
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            guardians: BTreeSet::new(),
            approvers: BTreeSet::new(),
        }
    }
}

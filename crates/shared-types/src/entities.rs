//! # Core Entities
//!
//! Identity and time primitives shared by all guard modules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete block height supplied by the host ledger.
///
/// This is the only notion of time in the engine; wall-clock time is never
/// consulted.
pub type BlockHeight = u64;

/// Token amount moved by a guarded operation.
pub type Amount = u128;

/// Identifier of a role-change proposal.
pub type ProposalId = u64;

/// Opaque account identifier.
///
/// Equality-comparable and orderable (so it can key ordered sets); no other
/// structure is assumed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Wrap an account identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Principal {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The explicit context attached to every guard operation.
///
/// The caller identity is authoritative: modules never read identity from
/// operation arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Account invoking the operation.
    pub caller: Principal,
    /// Current block height as reported by the host.
    pub block_height: BlockHeight,
}

impl CallContext {
    /// Create a context for `caller` at `block_height`.
    pub fn new(caller: impl Into<Principal>, block_height: BlockHeight) -> Self {
        Self {
            caller: caller.into(),
            block_height,
        }
    }

    /// Same caller, different block.
    #[must_use]
    pub fn at_block(&self, block_height: BlockHeight) -> Self {
        Self {
            caller: self.caller.clone(),
            block_height,
        }
    }
}

/// Recipient filter mode of the spend guard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMode {
    /// Every recipient is allowed.
    Disabled,
    /// Only members of the allow set are allowed.
    AllowList,
    /// Everyone except members of the deny set is allowed.
    #[default]
    DenyList,
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Disabled => "disabled",
            Self::AllowList => "allow_list",
            Self::DenyList => "deny_list",
        };
        f.write_str(label)
    }
}

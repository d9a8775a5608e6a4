//! Governor configuration.

use serde::{Deserialize, Serialize};
use shared_types::ConfigError;

/// Default number of distinct approvals needed to execute a proposal.
pub const DEFAULT_APPROVAL_THRESHOLD: usize = 2;

/// Governor parameters fixed at deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernorConfig {
    /// Distinct approvals required for execution. At least 1.
    pub approval_threshold: usize,
}

impl GovernorConfig {
    /// Build and validate.
    pub fn new(approval_threshold: usize) -> Result<Self, ConfigError> {
        let config = Self { approval_threshold };
        config.validate()?;
        Ok(config)
    }

    /// Reject a zero threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.approval_threshold == 0 {
            return Err(ConfigError::ZeroValue {
                field: "approval_threshold",
            });
        }
        Ok(())
    }
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
        }
    }
}

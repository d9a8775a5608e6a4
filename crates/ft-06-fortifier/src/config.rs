//! Deployment configuration for the guard modules.

use ft_01_access_registry::RegistryLimits;
use ft_03_spend_guard::SpendGuardLimits;
use ft_04_quarantine::QuarantineLimits;
use ft_05_role_governance::{GovernorConfig, DEFAULT_APPROVAL_THRESHOLD};
use serde::{Deserialize, Serialize};
use shared_types::{ConfigError, Principal};
use std::env;
use std::str::FromStr;

/// Deployment parameters, fixed for the lifetime of a `Fortifier`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FortifierConfig {
    /// Identity the role-change governor executes registry changes as.
    pub governor: Principal,
    /// Distinct approvals needed to execute a proposal.
    pub approval_threshold: usize,
    /// Maximum explicit guardians.
    pub max_guardians: usize,
    /// Maximum explicit approvers.
    pub max_approvers: usize,
    /// Maximum entries in each recipient list.
    pub max_list_entries: usize,
    /// Maximum quarantined recipients.
    pub max_quarantine_entries: usize,
    /// Maximum quarantine reason length in bytes.
    pub max_reason_len: usize,
    /// Events retained by the default in-memory bus.
    pub event_history: usize,
}

impl Default for FortifierConfig {
    fn default() -> Self {
        let registry = RegistryLimits::default();
        let lists = SpendGuardLimits::default();
        let quarantine = QuarantineLimits::default();
        Self {
            governor: Principal::new("fortifier.role-change-guardian"),
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
            max_guardians: registry.max_guardians,
            max_approvers: registry.max_approvers,
            max_list_entries: lists.max_list_entries,
            max_quarantine_entries: quarantine.max_entries,
            max_reason_len: quarantine.max_reason_len,
            event_history: shared_bus::DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl FortifierConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// # Environment Variables
    ///
    /// - `FT_GOVERNOR`
    /// - `FT_APPROVAL_THRESHOLD`
    /// - `FT_MAX_GUARDIANS`, `FT_MAX_APPROVERS`
    /// - `FT_MAX_LIST_ENTRIES`
    /// - `FT_MAX_QUARANTINE_ENTRIES`, `FT_MAX_REASON_LEN`
    /// - `FT_EVENT_HISTORY`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            governor: lookup("FT_GOVERNOR")
                .map(Principal::from)
                .unwrap_or(defaults.governor),
            approval_threshold: parse_or(&lookup, "FT_APPROVAL_THRESHOLD", defaults.approval_threshold)?,
            max_guardians: parse_or(&lookup, "FT_MAX_GUARDIANS", defaults.max_guardians)?,
            max_approvers: parse_or(&lookup, "FT_MAX_APPROVERS", defaults.max_approvers)?,
            max_list_entries: parse_or(&lookup, "FT_MAX_LIST_ENTRIES", defaults.max_list_entries)?,
            max_quarantine_entries: parse_or(
                &lookup,
                "FT_MAX_QUARANTINE_ENTRIES",
                defaults.max_quarantine_entries,
            )?,
            max_reason_len: parse_or(&lookup, "FT_MAX_REASON_LEN", defaults.max_reason_len)?,
            event_history: parse_or(&lookup, "FT_EVENT_HISTORY", defaults.event_history)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            field: "<document>".to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject zero limits, a zero threshold and an empty governor.
    ///
    /// `event_history` may be zero (no retained history).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.governor.is_empty() {
            return Err(ConfigError::EmptyPrincipal { field: "governor" });
        }
        let positive = [
            ("approval_threshold", self.approval_threshold),
            ("max_guardians", self.max_guardians),
            ("max_approvers", self.max_approvers),
            ("max_list_entries", self.max_list_entries),
            ("max_quarantine_entries", self.max_quarantine_entries),
            ("max_reason_len", self.max_reason_len),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::ZeroValue { field });
            }
        }
        Ok(())
    }

    /// Access registry limits.
    pub fn registry_limits(&self) -> RegistryLimits {
        RegistryLimits {
            max_guardians: self.max_guardians,
            max_approvers: self.max_approvers,
        }
    }

    /// Spend guard limits.
    pub fn spend_guard_limits(&self) -> SpendGuardLimits {
        SpendGuardLimits {
            max_list_entries: self.max_list_entries,
        }
    }

    /// Quarantine limits.
    pub fn quarantine_limits(&self) -> QuarantineLimits {
        QuarantineLimits {
            max_entries: self.max_quarantine_entries,
            max_reason_len: self.max_reason_len,
        }
    }

    /// Governor configuration.
    pub fn governor_config(&self) -> GovernorConfig {
        GovernorConfig {
            approval_threshold: self.approval_threshold,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Parse {
            field: key.to_string(),
            reason: e.to_string(),
        }),
    }
}

//! # Fortifier Metrics
//!
//! Prometheus metrics for the guarded-transfer pipeline and admin surface.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! ft-06-fortifier = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `fortifier_transfers_authorized_total` - Counter of authorized transfers
//! - `fortifier_transfers_rejected_total` - Counter of vetoed transfers (by reason)
//! - `fortifier_admin_actions_total` - Counter of committed admin operations (by operation)
//! - `fortifier_proposals_executed_total` - Counter of executed role-change proposals
//! - `fortifier_breaker_state` - Gauge of breaker state (0=Active, 1=Paused, 2=RateLimited)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_gauge, register_int_counter, CounterVec, Gauge, IntCounter,
};

use ft_02_circuit_breaker::EffectiveState;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total transfers authorized
    pub static ref TRANSFERS_AUTHORIZED: IntCounter = register_int_counter!(
        "fortifier_transfers_authorized_total",
        "Total number of guarded transfers authorized"
    )
    .expect("Failed to create TRANSFERS_AUTHORIZED metric");

    /// Total transfers rejected, labeled by reason
    pub static ref TRANSFERS_REJECTED: CounterVec = register_counter_vec!(
        "fortifier_transfers_rejected_total",
        "Total number of guarded transfers vetoed",
        &["reason"]
    )
    .expect("Failed to create TRANSFERS_REJECTED metric");

    /// Committed admin operations, labeled by operation
    pub static ref ADMIN_ACTIONS: CounterVec = register_counter_vec!(
        "fortifier_admin_actions_total",
        "Total number of committed admin operations",
        &["operation"]
    )
    .expect("Failed to create ADMIN_ACTIONS metric");

    /// Executed role-change proposals
    pub static ref PROPOSALS_EXECUTED: IntCounter = register_int_counter!(
        "fortifier_proposals_executed_total",
        "Total number of role-change proposals executed"
    )
    .expect("Failed to create PROPOSALS_EXECUTED metric");

    /// Breaker state (0=Active, 1=Paused, 2=RateLimited)
    pub static ref BREAKER_STATE: Gauge = register_gauge!(
        "fortifier_breaker_state",
        "Current circuit breaker state (0=Active, 1=Paused, 2=RateLimited)"
    )
    .expect("Failed to create BREAKER_STATE metric");
}

/// Gauge value for an effective breaker state.
pub fn breaker_state_code(state: &EffectiveState) -> u8 {
    match state {
        EffectiveState::Active => 0,
        EffectiveState::Paused => 1,
        EffectiveState::RateLimited { .. } => 2,
    }
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record an authorized transfer
#[cfg(feature = "metrics")]
pub fn record_transfer_authorized() {
    TRANSFERS_AUTHORIZED.inc();
}

/// Record a vetoed transfer with reason
#[cfg(feature = "metrics")]
pub fn record_transfer_rejected(reason: &str) {
    TRANSFERS_REJECTED.with_label_values(&[reason]).inc();
}

/// Record a committed admin operation
#[cfg(feature = "metrics")]
pub fn record_admin_action(operation: &str) {
    ADMIN_ACTIONS.with_label_values(&[operation]).inc();
}

/// Record an executed proposal
#[cfg(feature = "metrics")]
pub fn record_proposal_executed() {
    PROPOSALS_EXECUTED.inc();
}

/// Update breaker state gauge
#[cfg(feature = "metrics")]
pub fn set_breaker_state(state: &EffectiveState) {
    BREAKER_STATE.set(f64::from(breaker_state_code(state)));
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

/// Record an authorized transfer (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_transfer_authorized() {}

/// Record a rejected transfer (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_transfer_rejected(_reason: &str) {}

/// Record an admin action (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_admin_action(_operation: &str) {}

/// Record an executed proposal (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_proposal_executed() {}

/// Update breaker state gauge (no-op)
#[cfg(not(feature = "metrics"))]
pub fn set_breaker_state(_state: &EffectiveState) {}

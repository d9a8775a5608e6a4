//! # FT-06 Fortifier
//!
//! Composition root for the guard modules. Wires the access registry,
//! circuit breaker, spend guard, quarantine registry and role-change
//! governor together, publishes their audit events, and runs the
//! guarded-transfer pipeline.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Block heights never go backwards across operations | `service.rs` - `ensure_fresh()` |
//! | INVARIANT-2 | Events are published only after a module commits | `service.rs` - `run()`, `flush()` |
//! | INVARIANT-3 | A vetoed transfer records no spend | `service.rs` - `evaluate()` before `record_spend()` |
//! | INVARIANT-4 | Guards run in a fixed order: breaker, spend guard, quarantine | `service.rs` - `evaluate()` |
//! | INVARIANT-5 | Concurrent callers are serialised | `handle.rs` - `SharedFortifier` |
//!
//! ## Transfer Pipeline
//!
//! ```text
//! amount > 0 ─→ block fresh ─→ breaker ─→ spend cap ─→ recipient filter ─→ quarantine ─→ record spend
//!                                 │           │               │                 │
//!                                 └───────────┴──── veto ─────┴─────────────────┘──→ TransferRejected
//! ```
//!
//! ## Feature Flags
//!
//! - `metrics`: Prometheus counters and gauges (see `metrics.rs`).

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod domain;
pub mod error;
pub mod handle;
pub mod metrics;
pub mod ports;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::FortifierConfig;
    pub use crate::domain::decision::{TransferDecision, TransferReceipt, Veto};
    pub use crate::error::{FortifierError, FortifierResult};
    pub use crate::handle::SharedFortifier;
    pub use crate::ports::TransferGate;
    pub use crate::service::Fortifier;
    pub use shared_types::{CallContext, ErrorCode, Principal, RoleTag};
}

pub use config::FortifierConfig;
pub use domain::decision::{TransferDecision, TransferReceipt, Veto};
pub use error::{FortifierError, FortifierResult};
pub use handle::SharedFortifier;
pub use ports::TransferGate;
pub use service::Fortifier;

/// Module ID used in error codes and logs.
pub const MODULE_ID: u8 = 6;

/// Module name.
pub const MODULE_NAME: &str = "fortifier";

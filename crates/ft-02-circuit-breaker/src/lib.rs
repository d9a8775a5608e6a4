//! # FT-02 Circuit Breaker
//!
//! Global pause switch consulted before every guarded operation, with an
//! immediate unpause path and a delayed, rate-limited staged path.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Transitions are deterministic | `domain/state.rs` - `PauseState::next_state()` |
//! | INVARIANT-2 | `activation_block` > scheduling block | `domain/state.rs` - delay must be positive, no overflow |
//! | INVARIANT-3 | Pausing never overwrites the original actor | `domain/state.rs` - `AlreadyPaused` |
//! | INVARIANT-4 | Staged records are evaluated lazily on read | `domain/state.rs` - `PauseState::effective()` |
//! | INVARIANT-5 | Failed operations leave no state delta and no event | `service.rs` - commit after `next_state()` |
//!
//! ## Access Table
//!
//! | Operation | Allowed Roles |
//! |-----------|---------------|
//! | `pause` | Owner, Guardian |
//! | `unpause` | Owner |
//! | `staged_unpause` | Owner |
//! | `is_paused` | Any |

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod domain;
pub mod error;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::access::BreakerOperation;
    pub use crate::domain::state::{BreakerCommand, EffectiveState, PauseState};
    pub use crate::error::{BreakerError, BreakerResult};
    pub use crate::service::CircuitBreaker;
}

pub use domain::access::BreakerOperation;
pub use domain::state::{BreakerCommand, EffectiveState, PauseState};
pub use error::{BreakerError, BreakerResult};
pub use service::CircuitBreaker;

/// Module ID used in error codes and logs.
pub const MODULE_ID: u8 = 2;

/// Module name.
pub const MODULE_NAME: &str = "circuit-breaker";

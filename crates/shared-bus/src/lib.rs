//! # Shared Bus - Audit Event Bus for the Guard Modules
//!
//! Every committed guard action is published here as a `GuardEvent`.
//!
//! ## Rules
//!
//! - Modules never publish directly: they queue events while committing and
//!   the composition root drains and publishes them after the operation
//!   succeeds.
//! - A failed operation publishes nothing (except a transfer veto, which is
//!   itself an audit fact).
//!
//! ```text
//! ┌──────────────┐  take_events()  ┌──────────────┐   publish()   ┌──────────────┐
//! │ Guard module │ ──────────────→ │  Fortifier   │ ────────────→ │  Event Bus   │
//! └──────────────┘                 └──────────────┘               └──────┬───────┘
//!                                                                        │ subscribe()
//!                                                                        ▼
//!                                                                   auditors
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, GuardEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// Number of recent events the in-memory bus retains for late auditors.
pub const DEFAULT_HISTORY_CAPACITY: usize = 4096;

//! # Exploit Simulations
//!
//! Adversarial callers against the deployed facade. Every scenario asserts
//! both the refusal and that no state or audit event leaked through.

pub mod partial_state;
pub mod spoofed_governor;
pub mod stale_blocks;

//! Domain layer for the circuit breaker.

pub mod access;
pub mod state;

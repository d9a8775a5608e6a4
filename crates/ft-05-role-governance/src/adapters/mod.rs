//! # Adapters Layer
//!
//! Implements the outbound port for the in-process access registry.

mod registry;

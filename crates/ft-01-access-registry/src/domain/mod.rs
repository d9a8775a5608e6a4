//! Domain layer for the access registry.

pub mod access;
pub mod state;

//! Domain layer for the quarantine registry.

pub mod access;
pub mod entry;

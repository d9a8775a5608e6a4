//! Domain layer for role-change governance.

pub mod access;
pub mod config;
pub mod proposal;

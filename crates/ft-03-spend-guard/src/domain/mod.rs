//! Domain layer for the spend guard.

pub mod access;
pub mod filter;
pub mod window;

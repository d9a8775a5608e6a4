//! Ports for the role-change governor.

pub mod outbound;

pub use outbound::RoleAuthority;

//! # Shared Types Crate
//!
//! Types that every guard module agrees on:
//!
//! - **Identity**: `Principal`, the opaque account identifier.
//! - **Context**: `CallContext`, the caller plus the host's current block,
//!   attached to every operation.
//! - **Roles**: `Role`, `RoleTag`, the `RoleOracle` query trait and the
//!   `GuardedOperation` access tables.
//! - **Errors**: `ErrorKind` and the `ErrorCode` trait that every module
//!   error implements.
//!
//! ## Design Principles
//!
//! - **No shared storage**: nothing in this crate holds guard state.
//! - **Closed operation sets**: authorization is a table lookup against a
//!   module's operation enum, never dynamic dispatch on the caller.

pub mod entities;
pub mod errors;
pub mod security;

pub use entities::*;
pub use errors::*;
pub use security::*;

//! Ports for the composition root.

pub mod inbound;

pub use inbound::TransferGate;

//! Domain layer for the composition root.

pub mod decision;

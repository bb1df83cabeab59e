//! Command implementations

pub mod closest;
pub mod grid;
pub mod simulate;

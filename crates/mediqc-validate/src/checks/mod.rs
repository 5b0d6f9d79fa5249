//! Per-kind rule checks.
//!
//! Each check turns one rule into the set of record indices violating it.
//! Field presence has already been verified by the engine.

pub mod logic;
pub mod missing;
pub mod relation;

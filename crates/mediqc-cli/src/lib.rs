//! CLI library components for the `mediqc` binary.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;

//! Subcommands of the tabex CLI.

pub mod batch;
pub mod config;
pub mod extract;

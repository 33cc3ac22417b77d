//! Command-line interface
//!
//! Flag parsing and collaborator wiring. The tool is single-purpose, so
//! the surface is flags only: account, output prefix, page size, item
//! cap, resume override, and the local paths for credentials and cursor.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;

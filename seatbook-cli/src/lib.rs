//! Library exports for seatbook-cli.
//!
//! Exposes the CLI structure so documentation tooling can walk the command
//! tree.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod utils;

pub use cli::Cli;

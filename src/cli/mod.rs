//! Command-line interface for envcheck.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`run`] - The check command

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::{CheckCommand, Command, CommandResult};

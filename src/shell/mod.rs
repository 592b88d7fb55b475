//! Child process execution and platform detection.

pub mod command;
pub mod platform;

pub use command::{
    display_command, run_with_timeout, CommandOptions, CommandResult, ProcessOutcome,
};
pub use platform::{is_ci, is_ci_with_env};

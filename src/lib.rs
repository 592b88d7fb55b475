//! envcheck - Python development environment checker.
//!
//! envcheck inspects a project and the Python interpreter that will run it,
//! records one result per check in a JSON report, and prints a summary.
//!
//! # Modules
//!
//! - [`checks`] - The individual environment checks
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional `.envcheck.yml` loading and the per-run context
//! - [`error`] - Error types and result aliases
//! - [`python`] - Interpreter discovery and package probing
//! - [`report`] - The check report and its persistence
//! - [`runner`] - Checklist orchestration and the summary
//! - [`shell`] - Child processes with timeouts
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use envcheck::checks::structure;
//!
//! let dir = std::env::temp_dir();
//! let result = structure::evaluate(&dir, &[], &[]);
//! assert!(result.passed());
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod python;
pub mod report;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{EnvCheckError, Result};

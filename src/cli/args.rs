//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct. Every flag is optional; with
//! none, envcheck checks the current directory with the built-in defaults.

use clap::Parser;
use std::path::PathBuf;

/// envcheck - Python development environment checker.
#[derive(Debug, Parser)]
#[command(name = "envcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Path to config file (overrides default .envcheck.yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Python interpreter to check (name on PATH or path)
    #[arg(long, value_name = "PATH")]
    pub python: Option<PathBuf>,

    /// Only print the summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

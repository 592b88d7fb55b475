//! The check command.
//!
//! Loads configuration, builds the run context, and drives the [`Checker`].

use std::path::{Path, PathBuf};

use crate::config::{load_config, CheckContext};
use crate::error::Result;
use crate::runner::Checker;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Runs the full environment checklist for one project.
#[derive(Debug, Clone)]
pub struct CheckCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    python: Option<PathBuf>,
}

impl CheckCommand {
    /// Create a check command for the given project root.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
            python: None,
        }
    }

    /// Use this config file instead of `.envcheck.yml`.
    pub fn with_config(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Check this interpreter instead of the configured or discovered one.
    pub fn with_python(mut self, python: Option<PathBuf>) -> Self {
        self.python = python;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut config = load_config(&self.project_root, self.config_path.as_deref())?;
        if let Some(python) = &self.python {
            config.python = Some(python.clone());
        }

        let context = CheckContext::init(&self.project_root, config);
        let mut checker = Checker::new(context);

        if checker.run_all_checks(ui) {
            ui.message("");
            ui.message("Next step: open the notebooks in notebooks/ to start developing.");
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

//! Per-run check context.
//!
//! [`CheckContext::init`] is the single place where the target interpreter is
//! located and probed. Every check receives the context by reference.

use crate::config::schema::CheckConfig;
use crate::error::EnvCheckError;
use crate::python::{locate_interpreter, probe_interpreter, InterpreterInfo};
use std::path::{Path, PathBuf};

/// What is known about the target interpreter for this run.
#[derive(Debug)]
pub enum InterpreterStatus {
    /// Located and probed.
    Ready { path: PathBuf, info: InterpreterInfo },
    /// Located, but the probe failed.
    ProbeFailed { path: PathBuf, error: EnvCheckError },
    /// No interpreter could be located.
    NotFound(EnvCheckError),
}

/// Everything a check needs to know about the run.
#[derive(Debug)]
pub struct CheckContext {
    project_root: PathBuf,
    config: CheckConfig,
    interpreter: InterpreterStatus,
}

impl CheckContext {
    /// Locate and probe the interpreter, producing the context for one run.
    pub fn init(project_root: &Path, config: CheckConfig) -> Self {
        let project_root = absolute_root(project_root);
        let explicit = config
            .python
            .as_ref()
            .map(|p| resolve_interpreter_setting(&project_root, p));

        let interpreter = match locate_interpreter(explicit.as_deref()) {
            Ok(path) => match probe_interpreter(&path) {
                Ok(info) => InterpreterStatus::Ready { path, info },
                Err(error) => {
                    tracing::debug!("Interpreter probe failed: {}", error);
                    InterpreterStatus::ProbeFailed { path, error }
                }
            },
            Err(error) => {
                tracing::debug!("{}", error);
                InterpreterStatus::NotFound(error)
            }
        };

        Self::with_interpreter(&project_root, config, interpreter)
    }

    /// Build a context from an already-known interpreter status.
    ///
    /// A relative project root is taken from the working directory, since
    /// child processes run with the root as their working directory.
    pub fn with_interpreter(
        project_root: &Path,
        config: CheckConfig,
        interpreter: InterpreterStatus,
    ) -> Self {
        Self {
            project_root: absolute_root(project_root),
            config,
            interpreter,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Path of the target interpreter, if one was located.
    pub fn interpreter_path(&self) -> Result<&Path, &EnvCheckError> {
        match &self.interpreter {
            InterpreterStatus::Ready { path, .. } | InterpreterStatus::ProbeFailed { path, .. } => {
                Ok(path)
            }
            InterpreterStatus::NotFound(error) => Err(error),
        }
    }

    /// Probe results for the target interpreter.
    pub fn interpreter_info(&self) -> Result<&InterpreterInfo, &EnvCheckError> {
        match &self.interpreter {
            InterpreterStatus::Ready { info, .. } => Ok(info),
            InterpreterStatus::ProbeFailed { error, .. } | InterpreterStatus::NotFound(error) => {
                Err(error)
            }
        }
    }

    /// Resolve a configured path against the project root.
    pub fn project_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Where the report is written.
    pub fn report_path(&self) -> PathBuf {
        self.project_path(&self.config.report_path)
    }
}

fn absolute_root(project_root: &Path) -> PathBuf {
    std::path::absolute(project_root).unwrap_or_else(|_| project_root.to_path_buf())
}

/// Relative interpreter paths such as `.venv/bin/python` are taken from the
/// project root; bare names are left for the PATH search.
fn resolve_interpreter_setting(project_root: &Path, setting: &Path) -> PathBuf {
    let is_bare_name = setting.components().count() == 1 && !setting.is_absolute();
    if is_bare_name || setting.is_absolute() {
        setting.to_path_buf()
    } else {
        project_root.join(setting)
    }
}

//! Environment checks.
//!
//! Each check inspects one subject and produces a [`CheckResult`]. Checks
//! never fail outward: any fault met while checking becomes an `error`
//! result with the fault in `details`.
//!
//! The run order is the explicit list returned by [`all_checks`].
//!
//! # Modules
//!
//! - [`version`] - Interpreter version
//! - [`virtualenv`] - Virtual environment activation
//! - [`structure`] - Project directory layout
//! - [`packages`] - Required package presence
//! - [`syntax`] - Python source syntax
//! - [`library_tests`] - Library smoke-test script

pub mod library_tests;
pub mod packages;
pub mod structure;
pub mod syntax;
pub mod version;
pub mod virtualenv;

use crate::config::CheckContext;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Outcome category of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The condition is fully met.
    Success,
    /// The condition is not met, but it is not fatal.
    Warning,
    /// The condition failed, or checking it failed.
    Error,
}

impl CheckStatus {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The recorded outcome of one check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
    /// A string, a list of strings, or a mapping.
    pub details: Value,
}

impl CheckResult {
    pub fn success(message: impl Into<String>, details: Value) -> Self {
        Self::new(CheckStatus::Success, message, details)
    }

    pub fn warning(message: impl Into<String>, details: Value) -> Self {
        Self::new(CheckStatus::Warning, message, details)
    }

    pub fn error(message: impl Into<String>, details: Value) -> Self {
        Self::new(CheckStatus::Error, message, details)
    }

    fn new(status: CheckStatus, message: impl Into<String>, details: Value) -> Self {
        Self {
            status,
            message: message.into(),
            details,
        }
    }

    /// Whether the check passed. Warnings do not pass.
    pub fn passed(&self) -> bool {
        self.status.is_success()
    }
}

/// A named check in the run order.
#[derive(Clone, Copy)]
pub struct CheckDef {
    /// Report key, e.g. `python_version`.
    pub key: &'static str,
    /// Human label for progress lines.
    pub label: &'static str,
    pub run: fn(&CheckContext) -> CheckResult,
}

impl fmt::Debug for CheckDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckDef")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish()
    }
}

/// Every check, in run order.
pub fn all_checks() -> &'static [CheckDef] {
    const CHECKS: &[CheckDef] = &[
        CheckDef {
            key: "python_version",
            label: "Python version",
            run: version::run,
        },
        CheckDef {
            key: "virtual_env",
            label: "Virtual environment",
            run: virtualenv::run,
        },
        CheckDef {
            key: "project_structure",
            label: "Project structure",
            run: structure::run,
        },
        CheckDef {
            key: "packages",
            label: "Installed packages",
            run: packages::run,
        },
        CheckDef {
            key: "scripts_syntax",
            label: "Script syntax",
            run: syntax::run,
        },
        CheckDef {
            key: "library_tests",
            label: "Library tests",
            run: library_tests::run,
        },
    ];
    CHECKS
}

//! The check report and its persistence.
//!
//! A report is built during one run, written once at the end, and never read
//! back by envcheck itself.

use crate::checks::CheckResult;
use crate::error::{EnvCheckError, Result};
use chrono::{DateTime, Local};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fs;
use std::path::Path;

/// Reported when the interpreter could not be probed.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Check results keyed by check name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckSet {
    entries: Vec<(String, CheckResult)>,
}

impl CheckSet {
    /// Record a result. Recording an existing key replaces its result in place.
    pub fn insert(&mut self, key: &str, result: CheckResult) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = result,
            None => self.entries.push((key.to_string(), result)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CheckResult> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CheckResult)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of checks whose status is `success`.
    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.passed()).count()
    }
}

impl Serialize for CheckSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, result) in &self.entries {
            map.serialize_entry(key, result)?;
        }
        map.end()
    }
}

/// Everything one run found.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub timestamp: DateTime<Local>,
    pub interpreter_version: String,
    pub checks: CheckSet,
}

impl CheckReport {
    /// Start an empty report stamped with the current time.
    pub fn new(interpreter_version: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            interpreter_version: interpreter_version.into(),
            checks: CheckSet::default(),
        }
    }

    pub fn record(&mut self, key: &str, result: CheckResult) {
        self.checks.insert(key, result);
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report to `path`, replacing any previous report.
    pub fn save(&self, path: &Path) -> Result<()> {
        let write_failed = |message: String| EnvCheckError::ReportWriteFailed {
            path: path.to_path_buf(),
            message,
        };

        let mut content = self.to_json()?;
        content.push('\n');

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;
            }
        }

        // Write to a sibling temp file, then rename over the target.
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content).map_err(|e| write_failed(e.to_string()))?;
        fs::rename(&temp_path, path).map_err(|e| write_failed(e.to_string()))?;
        Ok(())
    }
}

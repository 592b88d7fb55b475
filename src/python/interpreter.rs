//! Python interpreter discovery and probing.
//!
//! The target interpreter is located once per run and queried with a small
//! probe script that reports its version and prefixes as JSON. Both the
//! version check and the virtual-environment check read from that single
//! probe.

use crate::error::{EnvCheckError, Result};
use crate::shell::{run_with_timeout, CommandOptions, ProcessOutcome};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Interpreter names searched on PATH when none is configured.
pub const DEFAULT_CANDIDATES: &[&str] = &["python3", "python"];

/// Limit for the probe script.
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Prints the interpreter's version and prefixes as a single JSON object.
///
/// Sticks to syntax that Python 2.7 also accepts so that old interpreters
/// are reported as too old rather than as unprobeable.
const PROBE_SCRIPT: &str = r#"import json, sys
print(json.dumps({
    "major": sys.version_info[0],
    "minor": sys.version_info[1],
    "micro": sys.version_info[2],
    "version": sys.version,
    "prefix": sys.prefix,
    "base_prefix": getattr(sys, "base_prefix", sys.prefix),
    "real_prefix": getattr(sys, "real_prefix", None),
}))"#;

/// Facts reported by the target interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterpreterInfo {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    /// Full `sys.version` string.
    pub version: String,
    pub prefix: PathBuf,
    pub base_prefix: PathBuf,
    /// Set by the legacy `virtualenv` tool.
    #[serde(default)]
    pub real_prefix: Option<PathBuf>,
}

impl InterpreterInfo {
    /// Parse the probe script's output.
    ///
    /// Only the last non-empty line is considered, so interpreters that print
    /// banners or warnings on startup still parse.
    pub fn parse(output: &str) -> Result<Self> {
        let line = output
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("");
        Ok(serde_json::from_str(line.trim())?)
    }

    /// `X.Y.Z`
    pub fn short_version(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.micro)
    }

    /// Whether the interpreter runs inside an isolated environment.
    pub fn in_virtualenv(&self) -> bool {
        self.real_prefix.is_some() || self.base_prefix != self.prefix
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{}.exe", tool));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Locate the target interpreter using the system PATH.
pub fn locate_interpreter(explicit: Option<&Path>) -> Result<PathBuf> {
    locate_interpreter_in(explicit, &parse_system_path())
}

/// Locate the target interpreter.
///
/// An explicit interpreter wins. A bare name (no path separator) is searched
/// on `path_entries`; anything else must be an existing executable file.
/// Without an explicit interpreter, [`DEFAULT_CANDIDATES`] are tried in order.
pub fn locate_interpreter_in(explicit: Option<&Path>, path_entries: &[PathBuf]) -> Result<PathBuf> {
    if let Some(explicit) = explicit {
        let is_bare_name = explicit.components().count() == 1 && !explicit.is_absolute();
        let found = if is_bare_name {
            resolve_tool_path(&explicit.to_string_lossy(), path_entries)
        } else if explicit.is_file() && is_executable(explicit) {
            Some(explicit.to_path_buf())
        } else {
            None
        };
        return found.ok_or_else(|| EnvCheckError::InterpreterNotFound {
            candidates: explicit.display().to_string(),
        });
    }

    DEFAULT_CANDIDATES
        .iter()
        .find_map(|name| resolve_tool_path(name, path_entries))
        .ok_or_else(|| EnvCheckError::InterpreterNotFound {
            candidates: DEFAULT_CANDIDATES.join(", "),
        })
}

/// Run the probe script with the given interpreter.
pub fn probe_interpreter(path: &Path) -> Result<InterpreterInfo> {
    let options = CommandOptions {
        cwd: None,
        timeout: PROBE_TIMEOUT,
    };

    let probe_failed = |message: String| EnvCheckError::InterpreterProbeFailed {
        path: path.to_path_buf(),
        message,
    };

    let result = match run_with_timeout(path, &["-c", PROBE_SCRIPT], &options) {
        Ok(ProcessOutcome::Completed(result)) => result,
        Ok(ProcessOutcome::TimedOut { timeout }) => {
            return Err(probe_failed(format!(
                "timed out after {} seconds",
                timeout.as_secs()
            )))
        }
        Err(e) => return Err(probe_failed(e.to_string())),
    };

    if !result.success {
        return Err(probe_failed(format!(
            "exited with code {:?}: {}",
            result.exit_code,
            result.stderr.trim()
        )));
    }

    let info = InterpreterInfo::parse(&result.stdout)
        .map_err(|e| probe_failed(format!("unexpected probe output: {}", e)))?;
    tracing::debug!(
        "Probed {}: Python {} (prefix {})",
        path.display(),
        info.short_version(),
        info.prefix.display()
    );
    Ok(info)
}

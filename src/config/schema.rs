//! Configuration schema.
//!
//! Every key is optional; a missing key falls back to the built-in default
//! so that running with no configuration file checks the standard project
//! layout.

use crate::python::packages::{default_packages, PackageSpec};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default name of the optional project configuration file.
pub const CONFIG_FILE_NAME: &str = ".envcheck.yml";

/// Default report location, relative to the project root.
pub const DEFAULT_REPORT_PATH: &str = "environment_check_report.json";

/// Default library smoke-test script, relative to the project root.
pub const DEFAULT_LIBRARY_TEST_SCRIPT: &str = "tests/test_libraries.py";

/// Default wall-clock limit for the library smoke tests, in seconds.
pub const DEFAULT_LIBRARY_TEST_TIMEOUT: u64 = 60;

/// What the checks look for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Interpreter to check instead of `python3`/`python` from PATH.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<PathBuf>,

    /// Directories that must exist under the project root.
    pub expected_dirs: Vec<String>,

    /// Files that must exist under the project root.
    pub expected_files: Vec<String>,

    /// Packages the interpreter must be able to import.
    pub packages: Vec<PackageSpec>,

    /// Directories whose `*.py` files are syntax checked (non-recursive).
    pub source_dirs: Vec<String>,

    /// Smoke-test script run with the interpreter.
    pub library_test_script: PathBuf,

    /// Timeout for the smoke-test script, in seconds.
    pub library_test_timeout: u64,

    /// Where the JSON report is written.
    pub report_path: PathBuf,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            python: None,
            expected_dirs: to_strings(&["src", "data", "notebooks", "tests", "outputs"]),
            expected_files: to_strings(&["requirements.txt", "README.md", ".gitignore"]),
            packages: default_packages(),
            source_dirs: to_strings(&["src", "tests"]),
            library_test_script: PathBuf::from(DEFAULT_LIBRARY_TEST_SCRIPT),
            library_test_timeout: DEFAULT_LIBRARY_TEST_TIMEOUT,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

impl CheckConfig {
    /// Smoke-test timeout as a [`Duration`].
    pub fn library_test_timeout(&self) -> Duration {
        Duration::from_secs(self.library_test_timeout)
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_layout() {
        let config = CheckConfig::default();
        assert_eq!(
            config.expected_dirs,
            vec!["src", "data", "notebooks", "tests", "outputs"]
        );
        assert_eq!(
            config.expected_files,
            vec!["requirements.txt", "README.md", ".gitignore"]
        );
        assert_eq!(config.source_dirs, vec!["src", "tests"]);
        assert_eq!(config.library_test_timeout(), Duration::from_secs(60));
        assert_eq!(
            config.report_path,
            PathBuf::from("environment_check_report.json")
        );
        assert!(config.python.is_none());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "expected_dirs: [src]\nlibrary_test_timeout: 5\n";
        let config: CheckConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.expected_dirs, vec!["src"]);
        assert_eq!(config.library_test_timeout, 5);
        assert_eq!(config.packages.len(), 8);
    }

    #[test]
    fn packages_parse_from_yaml() {
        let yaml = r#"
packages:
  - name: scikit-learn
    module: sklearn
"#;
        let config: CheckConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.packages,
            vec![PackageSpec::new("scikit-learn", "sklearn")]
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<CheckConfig, _> = serde_yaml::from_str("expected_dir: [src]\n");
        assert!(result.is_err());
    }
}

//! Package presence probes.
//!
//! Required packages are an explicit list of distribution name / import name
//! pairs. Whether a package is importable is answered by a [`PackageProbe`],
//! which yields a tri-state [`ProbeOutcome`] instead of a bare boolean.

use crate::shell::{run_with_timeout, CommandOptions, CommandResult, ProcessOutcome};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Limit for a single `import` probe.
const IMPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// A required third-party package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSpec {
    /// Distribution name, as installed with pip and shown in reports.
    pub name: String,
    /// Top-level module imported to prove the package is present.
    pub module: String,
}

impl PackageSpec {
    pub fn new(name: &str, module: &str) -> Self {
        Self {
            name: name.to_string(),
            module: module.to_string(),
        }
    }
}

/// The packages every project environment must provide.
pub fn default_packages() -> Vec<PackageSpec> {
    vec![
        PackageSpec::new("numpy", "numpy"),
        PackageSpec::new("pandas", "pandas"),
        PackageSpec::new("scikit-learn", "sklearn"),
        PackageSpec::new("matplotlib", "matplotlib"),
        PackageSpec::new("seaborn", "seaborn"),
        PackageSpec::new("trimesh", "trimesh"),
        PackageSpec::new("open3d", "open3d"),
        PackageSpec::new("jupyter", "jupyter"),
    ]
}

/// Result of probing one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The module imported cleanly.
    Present,
    /// The module is not installed.
    Absent,
    /// The probe itself went wrong (broken install, timeout, launch failure).
    Failed(String),
}

/// Answers whether a package can be imported.
pub trait PackageProbe {
    fn probe(&self, package: &PackageSpec) -> ProbeOutcome;
}

/// Probes packages by running `import <module>` in the target interpreter.
#[derive(Debug, Clone)]
pub struct InterpreterPackageProbe {
    interpreter: PathBuf,
    cwd: PathBuf,
    timeout: Duration,
}

impl InterpreterPackageProbe {
    /// Probe with `interpreter`, importing from `cwd` (the project root).
    pub fn new(interpreter: &Path, cwd: &Path) -> Self {
        Self {
            interpreter: interpreter.to_path_buf(),
            cwd: cwd.to_path_buf(),
            timeout: IMPORT_TIMEOUT,
        }
    }
}

impl PackageProbe for InterpreterPackageProbe {
    fn probe(&self, package: &PackageSpec) -> ProbeOutcome {
        if !is_valid_module_name(&package.module) {
            return ProbeOutcome::Failed(format!("invalid module name '{}'", package.module));
        }

        let code = format!("import {}", package.module);
        let options = CommandOptions {
            cwd: Some(self.cwd.clone()),
            timeout: self.timeout,
        };

        match run_with_timeout(&self.interpreter, &["-c", &code], &options) {
            Ok(ProcessOutcome::Completed(result)) => classify_import(&result),
            Ok(ProcessOutcome::TimedOut { timeout }) => ProbeOutcome::Failed(format!(
                "import timed out after {} seconds",
                timeout.as_secs()
            )),
            Err(e) => ProbeOutcome::Failed(e.to_string()),
        }
    }
}

/// Classify the result of an `import` probe.
pub fn classify_import(result: &CommandResult) -> ProbeOutcome {
    if result.success {
        return ProbeOutcome::Present;
    }
    if result.stderr.contains("ModuleNotFoundError") || result.stderr.contains("ImportError") {
        return ProbeOutcome::Absent;
    }
    let reason = result
        .stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .map(|l| l.trim().to_string())
        .unwrap_or_else(|| format!("exited with code {:?}", result.exit_code));
    ProbeOutcome::Failed(reason)
}

/// Dotted Python identifier, e.g. `sklearn` or `mpl_toolkits.mplot3d`.
fn is_valid_module_name(module: &str) -> bool {
    !module.is_empty()
        && module.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
                && chars.all(|c| c == '_' || c.is_alphanumeric())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_with(stderr: &str) -> CommandResult {
        CommandResult::failure(
            Some(1),
            String::new(),
            stderr.to_string(),
            Duration::from_millis(5),
        )
    }

    #[test]
    fn defaults_use_import_names() {
        let packages = default_packages();
        assert_eq!(packages.len(), 8);
        let sklearn = packages.iter().find(|p| p.name == "scikit-learn").unwrap();
        assert_eq!(sklearn.module, "sklearn");
    }

    #[test]
    fn successful_import_is_present() {
        let result = CommandResult::success(String::new(), String::new(), Duration::ZERO);
        assert_eq!(classify_import(&result), ProbeOutcome::Present);
    }

    #[test]
    fn module_not_found_is_absent() {
        let result = failed_with(
            "Traceback (most recent call last):\n  File \"<string>\", line 1, in <module>\nModuleNotFoundError: No module named 'numpy'\n",
        );
        assert_eq!(classify_import(&result), ProbeOutcome::Absent);
    }

    #[test]
    fn other_exception_is_failed_with_last_line() {
        let result = failed_with("Traceback...\nRuntimeError: broken BLAS install\n");
        assert_eq!(
            classify_import(&result),
            ProbeOutcome::Failed("RuntimeError: broken BLAS install".to_string())
        );
    }

    #[test]
    fn silent_failure_reports_exit_code() {
        let result = failed_with("");
        assert_eq!(
            classify_import(&result),
            ProbeOutcome::Failed("exited with code Some(1)".to_string())
        );
    }

    #[test]
    fn module_name_validation() {
        assert!(is_valid_module_name("sklearn"));
        assert!(is_valid_module_name("mpl_toolkits.mplot3d"));
        assert!(is_valid_module_name("_private"));
        assert!(!is_valid_module_name(""));
        assert!(!is_valid_module_name("scikit-learn"));
        assert!(!is_valid_module_name("os; import shutil"));
        assert!(!is_valid_module_name("3d"));
    }

    #[test]
    fn invalid_module_name_fails_without_spawning() {
        let probe =
            InterpreterPackageProbe::new(Path::new("/nonexistent/python3"), Path::new("/"));
        let outcome = probe.probe(&PackageSpec::new("scikit-learn", "scikit-learn"));
        assert!(matches!(outcome, ProbeOutcome::Failed(msg) if msg.contains("invalid module name")));
    }

    #[test]
    fn missing_interpreter_fails_probe() {
        let probe =
            InterpreterPackageProbe::new(Path::new("/nonexistent/python3"), Path::new("/"));
        let outcome = probe.probe(&PackageSpec::new("numpy", "numpy"));
        assert!(matches!(outcome, ProbeOutcome::Failed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn imports_run_from_project_root() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        // The stand-in interpreter can only "import" modules present as files
        // in its working directory.
        let temp = tempfile::TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        let project = temp.path().join("project");
        fs::create_dir_all(&bin).unwrap();
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("localmod.py"), "").unwrap();
        let python = bin.join("python3");
        fs::write(
            &python,
            "#!/bin/sh\nmodule=${2#import }\n[ -f \"$module.py\" ] && exit 0\necho \"ModuleNotFoundError: No module named '$module'\" >&2\nexit 1\n",
        )
        .unwrap();
        fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).unwrap();

        let probe = InterpreterPackageProbe::new(&python, &project);
        assert_eq!(
            probe.probe(&PackageSpec::new("localmod", "localmod")),
            ProbeOutcome::Present
        );
        assert_eq!(
            probe.probe(&PackageSpec::new("elsewhere", "elsewhere")),
            ProbeOutcome::Absent
        );
    }
}

//! Library smoke-test check.
//!
//! Runs the project's smoke-test script with the target interpreter under a
//! wall-clock timeout.

use super::CheckResult;
use crate::config::CheckContext;
use crate::error::EnvCheckError;
use crate::shell::{run_with_timeout, CommandOptions, ProcessOutcome};
use serde_json::json;
use std::path::Path;
use std::time::Duration;

pub fn run(ctx: &CheckContext) -> CheckResult {
    let script = ctx.project_path(&ctx.config().library_test_script);
    evaluate(
        ctx.interpreter_path(),
        &script,
        ctx.project_root(),
        ctx.config().library_test_timeout(),
    )
}

pub fn evaluate(
    interpreter: Result<&Path, &EnvCheckError>,
    script: &Path,
    cwd: &Path,
    timeout: Duration,
) -> CheckResult {
    if !script.is_file() {
        return CheckResult::error(
            "Test script not found",
            json!(format!("{} does not exist", script.display())),
        );
    }

    let interpreter = match interpreter {
        Ok(path) => path,
        Err(e) => return CheckResult::error("Failed to run library tests", json!(e.to_string())),
    };

    let script_arg = script.to_string_lossy();
    let options = CommandOptions {
        cwd: Some(cwd.to_path_buf()),
        timeout,
    };

    match run_with_timeout(interpreter, &[script_arg.as_ref()], &options) {
        Ok(ProcessOutcome::Completed(result)) if result.success => CheckResult::success(
            "All library tests passed",
            json!({
                "stdout": result.stdout,
                "stderr": result.stderr,
            }),
        ),
        Ok(ProcessOutcome::Completed(result)) => CheckResult::error(
            "Some library tests failed",
            json!({
                "return_code": result.exit_code,
                "stdout": result.stdout,
                "stderr": result.stderr,
            }),
        ),
        Ok(ProcessOutcome::TimedOut { timeout }) => CheckResult::error(
            "Library tests timed out",
            json!(format!(
                "Tests took longer than {} seconds",
                timeout.as_secs()
            )),
        ),
        Err(e) => CheckResult::error("Failed to run library tests", json!(e.to_string())),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::checks::CheckStatus;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// A project with a smoke-test script run by `/bin/sh` in place of Python.
    fn project(script_body: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("tests/test_libraries.py");
        fs::create_dir_all(script.parent().unwrap()).unwrap();
        fs::write(&script, script_body).unwrap();
        (temp, script)
    }

    fn sh() -> PathBuf {
        PathBuf::from("/bin/sh")
    }

    #[test]
    fn passing_script_is_success() {
        let (temp, script) = project("echo 'NumPy working'\n");
        let sh = sh();

        let result = evaluate(Ok(&sh), &script, temp.path(), Duration::from_secs(10));
        assert_eq!(result.status, CheckStatus::Success);
        assert!(result.details["stdout"]
            .as_str()
            .unwrap()
            .contains("NumPy working"));
    }

    #[test]
    fn failing_script_captures_output_and_code() {
        let (temp, script) = project("echo 'Open3D import error' >&2\nexit 1\n");
        let sh = sh();

        let result = evaluate(Ok(&sh), &script, temp.path(), Duration::from_secs(10));
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.message, "Some library tests failed");
        assert_eq!(result.details["return_code"], 1);
        assert!(result.details["stderr"]
            .as_str()
            .unwrap()
            .contains("Open3D import error"));
    }

    #[test]
    fn hanging_script_times_out_with_distinct_message() {
        let (temp, script) = project("exec sleep 70\n");
        let sh = sh();

        let result = evaluate(Ok(&sh), &script, temp.path(), Duration::from_secs(1));
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.message, "Library tests timed out");
        assert_eq!(result.details, json!("Tests took longer than 1 seconds"));
        assert_ne!(result.message, "Some library tests failed");
    }

    #[test]
    fn missing_script_is_error() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join("tests/test_libraries.py");
        let sh = sh();

        let result = evaluate(Ok(&sh), &script, temp.path(), Duration::from_secs(10));
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.message, "Test script not found");
        assert!(result.details.as_str().unwrap().ends_with("does not exist"));
    }

    #[test]
    fn missing_interpreter_is_launch_error() {
        let (temp, script) = project("exit 0\n");
        let err = EnvCheckError::InterpreterNotFound {
            candidates: "python3, python".to_string(),
        };

        let result = evaluate(Err(&err), &script, temp.path(), Duration::from_secs(10));
        assert_eq!(result.message, "Failed to run library tests");
    }

    #[test]
    fn runs_from_project_root() {
        let (temp, script) = project("test -f README.md || exit 7\n");
        fs::write(temp.path().join("README.md"), "# project").unwrap();
        let sh = sh();

        let result = evaluate(Ok(&sh), &script, temp.path(), Duration::from_secs(10));
        assert!(result.passed());
    }

    #[test]
    fn unlaunchable_interpreter_reports_os_reason() {
        let (temp, script) = project("exit 0\n");
        let python = temp.path().join("python3");
        fs::write(&python, "#!/bin/sh\nexit 0\n").unwrap();

        let result = evaluate(Ok(&python), &script, temp.path(), Duration::from_secs(10));
        assert_eq!(result.message, "Failed to run library tests");
        let details = result.details.as_str().unwrap();
        assert!(details.contains("Permission denied"), "got: {}", details);
        assert!(!details.contains("None"));
    }
}

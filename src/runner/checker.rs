//! The checklist runner.

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::checks::{all_checks, CheckDef};
use crate::config::CheckContext;
use crate::error::Result;
use crate::report::{CheckReport, UNKNOWN_VERSION};
use crate::ui::UserInterface;

use super::summary::{banner, check_lines, result_line};

/// Runs the checklist against one context and owns the report it builds.
pub struct Checker {
    context: CheckContext,
    report: CheckReport,
}

impl Checker {
    /// Start an empty report for `context`.
    pub fn new(context: CheckContext) -> Self {
        let version = context
            .interpreter_info()
            .map(|info| info.version.clone())
            .unwrap_or_else(|_| UNKNOWN_VERSION.to_string());

        Self {
            context,
            report: CheckReport::new(version),
        }
    }

    pub fn report(&self) -> &CheckReport {
        &self.report
    }

    /// Run one check, record its result, and return whether it passed.
    pub fn run_check(&mut self, def: &CheckDef, ui: &mut dyn UserInterface) -> bool {
        let mut spinner = ui.start_spinner(&format!("Checking {}...", def.label));

        let result = (def.run)(&self.context);
        let passed = result.passed();
        debug!(
            check = def.key,
            status = %result.status,
            "{}",
            result.message
        );

        if passed {
            spinner.finish_success(&format!("{} - OK", def.label));
        } else {
            spinner.finish_error(&format!("{} - problem detected", def.label));
        }

        self.report.record(def.key, result);
        passed
    }

    /// Run every check in order, save the report, and print the summary.
    ///
    /// Returns true iff every check succeeded.
    pub fn run_all_checks(&mut self, ui: &mut dyn UserInterface) -> bool {
        info!(
            project = %self.context.project_root().display(),
            "Starting environment check"
        );
        if ui.output_mode().shows_progress() {
            ui.message("Starting environment check...");
        }

        for def in all_checks() {
            self.run_check(def, ui);
        }

        match self.save_report() {
            Ok(path) => ui.message(&format!("Report saved to: {}", path.display())),
            Err(e) => {
                warn!("{}", e);
                ui.warning(&format!("Could not save report: {}", e));
            }
        }

        self.print_summary(ui)
    }

    /// Write the report to the configured path, replacing any previous one.
    pub fn save_report(&self) -> Result<PathBuf> {
        let path = self.context.report_path();
        self.report.save(&path)?;
        debug!("Report written to {}", path.display());
        Ok(path)
    }

    /// Print the summary and return whether every recorded check passed.
    pub fn print_summary(&self, ui: &mut dyn UserInterface) -> bool {
        let checks = &self.report.checks;
        let passed = checks.success_count();
        let total = checks.len();

        ui.message("");
        ui.show_header(&banner());
        ui.show_header("ENVIRONMENT CHECK SUMMARY");
        ui.show_header(&banner());
        for line in check_lines(checks) {
            ui.message(&line);
        }

        ui.message("");
        ui.show_header(&banner());
        ui.message(&result_line(passed, total));

        let all_passed = passed == total;
        if all_passed {
            ui.success("ENVIRONMENT FULLY CONFIGURED");
            ui.message("   You can move on to the next stage of the project.");
        } else {
            ui.warning("SOME PROBLEMS FOUND");
            ui.message("   Resolve the problems above before continuing.");
        }
        ui.show_header(&banner());

        info!(passed, total, "Environment check finished");
        all_passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckResult, CheckStatus};
    use crate::config::{CheckConfig, InterpreterStatus};
    use crate::error::EnvCheckError;
    use crate::ui::{MockUI, SpinnerStatus};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn no_interpreter(root: &std::path::Path) -> CheckContext {
        CheckContext::with_interpreter(
            root,
            CheckConfig::default(),
            InterpreterStatus::NotFound(EnvCheckError::InterpreterNotFound {
                candidates: "python3, python".to_string(),
            }),
        )
    }

    #[test]
    fn unknown_version_without_interpreter() {
        let temp = TempDir::new().unwrap();
        let checker = Checker::new(no_interpreter(temp.path()));
        assert_eq!(checker.report().interpreter_version, "unknown");
        assert!(checker.report().checks.is_empty());
    }

    #[test]
    fn run_check_records_one_result() {
        let temp = TempDir::new().unwrap();
        let mut checker = Checker::new(no_interpreter(temp.path()));
        let mut ui = MockUI::new();

        let def = &all_checks()[2];
        let passed = checker.run_check(def, &mut ui);

        assert!(!passed);
        assert_eq!(checker.report().checks.len(), 1);
        let result = checker.report().checks.get("project_structure").unwrap();
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(ui.spinners(), ["Checking Project structure..."]);
        assert_eq!(
            ui.spinner_finishes(),
            vec![(
                "Project structure - problem detected".to_string(),
                SpinnerStatus::Error
            )]
        );
    }

    #[test]
    fn run_check_twice_keeps_one_entry() {
        let temp = TempDir::new().unwrap();
        let mut checker = Checker::new(no_interpreter(temp.path()));
        let mut ui = MockUI::new();
        let def = &all_checks()[0];

        checker.run_check(def, &mut ui);
        checker.run_check(def, &mut ui);

        assert_eq!(checker.report().checks.len(), 1);
    }

    #[test]
    fn run_all_checks_without_interpreter_fails() {
        let temp = TempDir::new().unwrap();
        let mut checker = Checker::new(no_interpreter(temp.path()));
        let mut ui = MockUI::new();

        assert!(!checker.run_all_checks(&mut ui));

        let keys: Vec<_> = checker.report().checks.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            [
                "python_version",
                "virtual_env",
                "project_structure",
                "packages",
                "scripts_syntax",
                "library_tests"
            ]
        );
        assert!(ui.has_warning("SOME PROBLEMS FOUND"));
        assert!(ui.has_message("Resolve the problems above before continuing."));

        let saved = fs::read_to_string(temp.path().join("environment_check_report.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(value["interpreter_version"], "unknown");
        assert_eq!(value["checks"].as_object().unwrap().len(), 6);
    }

    #[test]
    fn report_save_failure_does_not_abort() {
        let temp = TempDir::new().unwrap();
        // A directory where the report file should be makes the rename fail.
        fs::create_dir(temp.path().join("environment_check_report.json")).unwrap();
        fs::write(
            temp.path()
                .join("environment_check_report.json")
                .join("keep"),
            "x",
        )
        .unwrap();

        let mut checker = Checker::new(no_interpreter(temp.path()));
        let mut ui = MockUI::new();

        assert!(!checker.run_all_checks(&mut ui));
        assert!(ui.has_warning("Could not save report"));
        assert!(ui.has_message("RESULT: "));
    }

    #[test]
    fn print_summary_all_passed() {
        let temp = TempDir::new().unwrap();
        let mut checker = Checker::new(no_interpreter(temp.path()));
        checker
            .report
            .record("python_version", CheckResult::success("Python 3.11.4", json!("3.11.4")));
        checker.report.record(
            "packages",
            CheckResult::success("All required packages installed", json!({"installed": []})),
        );

        let mut ui = MockUI::new();
        assert!(checker.print_summary(&mut ui));
        assert!(ui.has_message("RESULT: 2/2 checks passed"));
        assert!(ui.has_success("ENVIRONMENT FULLY CONFIGURED"));
        assert!(ui.headers().contains(&"ENVIRONMENT CHECK SUMMARY".to_string()));
    }

    #[test]
    fn print_summary_warning_counts_as_failure() {
        let temp = TempDir::new().unwrap();
        let mut checker = Checker::new(no_interpreter(temp.path()));
        checker.report.record(
            "virtual_env",
            CheckResult::warning(
                "Virtual environment not detected",
                json!("Using a virtual environment is recommended"),
            ),
        );

        let mut ui = MockUI::new();
        assert!(!checker.print_summary(&mut ui));
        assert!(ui.has_message("RESULT: 0/1 checks passed"));
        assert!(ui.has_message("Virtual Env:"));
        assert!(ui.has_message("Using a virtual environment is recommended"));
    }

    #[test]
    fn print_summary_flattens_structure_details() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        let mut checker = Checker::new(no_interpreter(temp.path()));
        let mut ui = MockUI::new();

        checker.run_check(&all_checks()[2], &mut ui);
        ui.clear();
        checker.print_summary(&mut ui);

        assert!(ui.has_message("    missing_dirs: data, notebooks, tests, outputs"));
        assert!(ui.messages().iter().all(|m| !m.contains("missing_dirs: src")));
    }
}

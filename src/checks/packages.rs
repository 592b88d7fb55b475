//! Required package presence check.

use super::CheckResult;
use crate::config::CheckContext;
use crate::python::{InterpreterPackageProbe, PackageProbe, PackageSpec, ProbeOutcome};
use serde_json::{json, Map, Value};

pub fn run(ctx: &CheckContext) -> CheckResult {
    match ctx.interpreter_path() {
        Ok(path) => {
            let probe = InterpreterPackageProbe::new(path, ctx.project_root());
            evaluate(&ctx.config().packages, &probe)
        }
        Err(e) => CheckResult::error("Python interpreter unavailable", json!(e.to_string())),
    }
}

/// Passes iff every package probes as [`ProbeOutcome::Present`].
///
/// Failed probes are listed as missing, with their reasons under `errors`.
pub fn evaluate(packages: &[PackageSpec], probe: &dyn PackageProbe) -> CheckResult {
    let mut installed = Vec::new();
    let mut missing = Vec::new();
    let mut errors = Vec::new();

    for package in packages {
        match probe.probe(package) {
            ProbeOutcome::Present => installed.push(package.name.clone()),
            ProbeOutcome::Absent => missing.push(package.name.clone()),
            ProbeOutcome::Failed(reason) => {
                tracing::debug!("Probe for {} failed: {}", package.name, reason);
                errors.push(format!("{}: {}", package.name, reason));
                missing.push(package.name.clone());
            }
        }
    }

    if missing.is_empty() {
        return CheckResult::success(
            "All required packages installed",
            json!({ "installed": installed }),
        );
    }

    let mut details = Map::new();
    details.insert("installed".to_string(), json!(installed));
    details.insert("missing".to_string(), json!(missing));
    if !errors.is_empty() {
        details.insert("errors".to_string(), json!(errors));
    }

    let noun = if missing.len() == 1 {
        "package"
    } else {
        "packages"
    };
    CheckResult::error(
        format!("{} {} missing", missing.len(), noun),
        Value::Object(details),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckStatus;
    use crate::python::default_packages;
    use std::collections::HashMap;

    /// Probe with canned outcomes; unlisted modules are present.
    struct FakeProbe {
        outcomes: HashMap<&'static str, ProbeOutcome>,
    }

    impl FakeProbe {
        fn new(outcomes: Vec<(&'static str, ProbeOutcome)>) -> Self {
            Self {
                outcomes: outcomes.into_iter().collect(),
            }
        }
    }

    impl PackageProbe for FakeProbe {
        fn probe(&self, package: &PackageSpec) -> ProbeOutcome {
            self.outcomes
                .get(package.module.as_str())
                .cloned()
                .unwrap_or(ProbeOutcome::Present)
        }
    }

    #[test]
    fn all_present_passes() {
        let probe = FakeProbe::new(vec![]);
        let result = evaluate(&default_packages(), &probe);
        assert_eq!(result.status, CheckStatus::Success);
        assert_eq!(result.details["installed"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn missing_numpy_is_reported_alone() {
        let probe = FakeProbe::new(vec![("numpy", ProbeOutcome::Absent)]);
        let result = evaluate(&default_packages(), &probe);

        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.details["missing"], json!(["numpy"]));
        assert_eq!(result.message, "1 package missing");
        assert!(result.details.get("errors").is_none());
        let installed = result.details["installed"].as_array().unwrap();
        assert_eq!(installed.len(), 7);
        assert!(installed.contains(&json!("scikit-learn")));
    }

    #[test]
    fn failed_probe_counts_as_missing_with_reason() {
        let probe = FakeProbe::new(vec![
            ("open3d", ProbeOutcome::Failed("OSError: libGL.so.1".to_string())),
            ("trimesh", ProbeOutcome::Absent),
        ]);
        let result = evaluate(&default_packages(), &probe);

        assert_eq!(result.message, "2 packages missing");
        assert_eq!(result.details["missing"], json!(["trimesh", "open3d"]));
        assert_eq!(
            result.details["errors"],
            json!(["open3d: OSError: libGL.so.1"])
        );
    }

    #[test]
    fn reports_distribution_names() {
        let probe = FakeProbe::new(vec![("sklearn", ProbeOutcome::Absent)]);
        let result = evaluate(&default_packages(), &probe);
        assert_eq!(result.details["missing"], json!(["scikit-learn"]));
    }
}

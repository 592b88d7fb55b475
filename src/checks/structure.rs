//! Project directory layout check.

use super::CheckResult;
use crate::config::CheckContext;
use serde_json::json;
use std::path::Path;

pub fn run(ctx: &CheckContext) -> CheckResult {
    let config = ctx.config();
    evaluate(
        ctx.project_root(),
        &config.expected_dirs,
        &config.expected_files,
    )
}

/// Passes iff every expected directory and file exists under `root`.
///
/// Missing entries are reported in the order they were expected.
pub fn evaluate(root: &Path, expected_dirs: &[String], expected_files: &[String]) -> CheckResult {
    let missing_dirs: Vec<&String> = expected_dirs
        .iter()
        .filter(|d| !root.join(d).is_dir())
        .collect();
    let missing_files: Vec<&String> = expected_files
        .iter()
        .filter(|f| !root.join(f).exists())
        .collect();

    if missing_dirs.is_empty() && missing_files.is_empty() {
        CheckResult::success(
            "Project structure complete",
            json!({
                "dirs": expected_dirs,
                "files": expected_files,
            }),
        )
    } else {
        CheckResult::error(
            "Project structure incomplete",
            json!({
                "missing_dirs": missing_dirs,
                "missing_files": missing_files,
            }),
        )
    }
}

//! Virtual environment activation check.
//!
//! A system interpreter is a `warning`, not an `error`, but it still does not
//! count as passed.

use super::CheckResult;
use crate::config::CheckContext;
use crate::error::EnvCheckError;
use crate::python::InterpreterInfo;
use serde_json::json;

pub fn run(ctx: &CheckContext) -> CheckResult {
    evaluate(ctx.interpreter_info())
}

pub fn evaluate(info: Result<&InterpreterInfo, &EnvCheckError>) -> CheckResult {
    match info {
        Ok(info) if info.in_virtualenv() => CheckResult::success(
            "Virtual environment active",
            json!(format!("Prefix: {}", info.prefix.display())),
        ),
        Ok(_) => CheckResult::warning(
            "Virtual environment not detected",
            json!("Using a virtual environment is recommended"),
        ),
        Err(e) => CheckResult::error("Python interpreter unavailable", json!(e.to_string())),
    }
}

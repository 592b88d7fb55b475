//! Interpreter version check.

use super::CheckResult;
use crate::config::CheckContext;
use crate::error::EnvCheckError;
use crate::python::InterpreterInfo;
use serde_json::json;

/// Oldest supported Python release.
pub const MIN_VERSION: (u32, u32) = (3, 8);

/// Whether `major.minor` is a supported interpreter version.
pub fn version_supported(major: u32, minor: u32) -> bool {
    major == MIN_VERSION.0 && minor >= MIN_VERSION.1
}

pub fn run(ctx: &CheckContext) -> CheckResult {
    evaluate(ctx.interpreter_info())
}

pub fn evaluate(info: Result<&InterpreterInfo, &EnvCheckError>) -> CheckResult {
    let info = match info {
        Ok(info) => info,
        Err(e) => {
            return CheckResult::error("Python interpreter unavailable", json!(e.to_string()))
        }
    };

    if version_supported(info.major, info.minor) {
        CheckResult::success(
            format!("Python {}", info.short_version()),
            json!(info.version),
        )
    } else {
        CheckResult::error(
            format!(
                "Python {}.{} (requires {}.{}+)",
                info.major, info.minor, MIN_VERSION.0, MIN_VERSION.1
            ),
            json!(info.version),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckStatus;
    use std::path::PathBuf;

    fn interpreter(major: u32, minor: u32) -> InterpreterInfo {
        InterpreterInfo {
            major,
            minor,
            micro: 1,
            version: format!("{}.{}.1 (default)", major, minor),
            prefix: PathBuf::from("/usr"),
            base_prefix: PathBuf::from("/usr"),
            real_prefix: None,
        }
    }

    #[test]
    fn supported_versions() {
        assert!(version_supported(3, 8));
        assert!(version_supported(3, 12));
        assert!(!version_supported(3, 7));
        assert!(!version_supported(2, 7));
        assert!(!version_supported(4, 0));
    }

    #[test]
    fn modern_python_passes() {
        let result = evaluate(Ok(&interpreter(3, 12)));
        assert_eq!(result.status, CheckStatus::Success);
        assert_eq!(result.message, "Python 3.12.1");
        assert_eq!(result.details, json!("3.12.1 (default)"));
    }

    #[test]
    fn python_3_8_passes() {
        assert!(evaluate(Ok(&interpreter(3, 8))).passed());
    }

    #[test]
    fn python_3_7_fails_with_requirement() {
        let result = evaluate(Ok(&interpreter(3, 7)));
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.message, "Python 3.7 (requires 3.8+)");
    }

    #[test]
    fn python_2_fails() {
        assert!(!evaluate(Ok(&interpreter(2, 7))).passed());
    }

    #[test]
    fn unavailable_interpreter_is_error() {
        let err = EnvCheckError::InterpreterNotFound {
            candidates: "python3, python".to_string(),
        };
        let result = evaluate(Err(&err));
        assert_eq!(result.status, CheckStatus::Error);
        assert!(result.details.as_str().unwrap().contains("python3, python"));
    }
}

//! Compiling project sources with the target interpreter.
//!
//! One child process compiles every file, so the verdict follows the
//! interpreter's own grammar and compiler rather than a fixed parser.

use crate::error::{EnvCheckError, Result};
use crate::shell::{run_with_timeout, CommandOptions, ProcessOutcome};
use std::path::Path;
use std::time::Duration;

/// Limit for compiling all sources in one run.
const COMPILE_TIMEOUT: Duration = Duration::from_secs(60);

/// Compiles each path in `sys.argv[1:]` and prints a JSON list with one entry
/// per file: `null` when it compiles, otherwise the error text.
const COMPILE_SCRIPT: &str = r#"import io, json, sys
verdicts = []
for path in sys.argv[1:]:
    try:
        with io.open(path, encoding="utf-8") as f:
            source = f.read()
    except Exception as e:
        verdicts.append("failed to read file: %s" % e)
        continue
    try:
        compile(source, path, "exec")
        verdicts.append(None)
    except SyntaxError as e:
        verdicts.append(str(e))
    except Exception as e:
        verdicts.append("%s: %s" % (type(e).__name__, e))
print(json.dumps(verdicts))"#;

/// Compile `files` (relative to `cwd`) with `interpreter`.
///
/// Returns one verdict per file, in order: `None` when the file compiles.
pub fn compile_sources(
    interpreter: &Path,
    cwd: &Path,
    files: &[String],
) -> Result<Vec<Option<String>>> {
    let failed = |message: String| EnvCheckError::InterpreterProbeFailed {
        path: interpreter.to_path_buf(),
        message,
    };

    let mut args = vec!["-c", COMPILE_SCRIPT];
    args.extend(files.iter().map(String::as_str));
    let options = CommandOptions {
        cwd: Some(cwd.to_path_buf()),
        timeout: COMPILE_TIMEOUT,
    };

    let result = match run_with_timeout(interpreter, &args, &options)? {
        ProcessOutcome::Completed(result) if result.success => result,
        ProcessOutcome::Completed(result) => {
            return Err(failed(format!(
                "compile run exited with code {:?}: {}",
                result.exit_code,
                result.stderr.trim()
            )))
        }
        ProcessOutcome::TimedOut { timeout } => {
            return Err(failed(format!(
                "compile run timed out after {} seconds",
                timeout.as_secs()
            )))
        }
    };

    parse_verdicts(&result.stdout, files.len())
        .map_err(|message| failed(format!("unexpected compile output: {}", message)))
}

/// Read the JSON verdict list from the last non-empty output line.
fn parse_verdicts(output: &str, expected: usize) -> std::result::Result<Vec<Option<String>>, String> {
    let line = output
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("");
    let verdicts: Vec<Option<String>> =
        serde_json::from_str(line.trim()).map_err(|e| e.to_string())?;
    if verdicts.len() != expected {
        return Err(format!(
            "expected {} verdicts, got {}",
            expected,
            verdicts.len()
        ));
    }
    Ok(verdicts)
}

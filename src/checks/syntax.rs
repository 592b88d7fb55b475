//! Python source syntax check.
//!
//! Every `*.py` file directly inside the configured source directories is
//! compiled by the target interpreter. Subdirectories are not scanned. When
//! no interpreter is available, or it cannot run the compile step, files are
//! parsed with `rustpython-parser` instead.

use super::CheckResult;
use crate::config::CheckContext;
use crate::python::compile_sources;
use rustpython_parser::{parse, Mode};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// A file that failed to compile or could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFile {
    pub file: String,
    pub error: String,
}

pub fn run(ctx: &CheckContext) -> CheckResult {
    evaluate(
        ctx.project_root(),
        &ctx.config().source_dirs,
        ctx.interpreter_path().ok(),
    )
}

pub fn evaluate(root: &Path, source_dirs: &[String], interpreter: Option<&Path>) -> CheckResult {
    let files: Vec<String> = collect_python_files(root, source_dirs)
        .iter()
        .map(|relative| relative.display().to_string())
        .collect();

    let verdicts = match interpreter {
        Some(interpreter) if !files.is_empty() => match compile_sources(interpreter, root, &files) {
            Ok(verdicts) => verdicts,
            Err(e) => {
                tracing::debug!("Falling back to the built-in parser: {}", e);
                parse_files(root, &files)
            }
        },
        _ => parse_files(root, &files),
    };

    let mut valid_files = Vec::new();
    let mut invalid_files = Vec::new();
    for (file, verdict) in files.into_iter().zip(verdicts) {
        match verdict {
            None => valid_files.push(file),
            Some(error) => {
                tracing::debug!(file = %file, "{}", error);
                invalid_files.push(InvalidFile { file, error });
            }
        }
    }

    if invalid_files.is_empty() {
        return CheckResult::success(
            "All scripts have valid syntax",
            json!({ "valid_files": valid_files }),
        );
    }

    let noun = if invalid_files.len() == 1 {
        "file"
    } else {
        "files"
    };
    let invalid: Vec<_> = invalid_files
        .iter()
        .map(|f| json!({ "file": f.file, "error": f.error }))
        .collect();
    CheckResult::error(
        format!("{} {} with problems", invalid_files.len(), noun),
        json!({
            "valid_files": valid_files,
            "invalid_files": invalid,
        }),
    )
}

/// Parse each file in-process; one verdict per file, `None` when it parses.
fn parse_files(root: &Path, files: &[String]) -> Vec<Option<String>> {
    files
        .iter()
        .map(|file| check_file(&root.join(file), file).err())
        .collect()
}

/// `*.py` files directly inside each source dir, relative to `root`.
///
/// Each directory's files are sorted; directories keep their configured order.
pub fn collect_python_files(root: &Path, source_dirs: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in source_dirs {
        let Ok(entries) = fs::read_dir(root.join(dir)) else {
            continue;
        };
        let mut found: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "py"))
            .map(|entry| Path::new(dir).join(entry.file_name()))
            .collect();
        found.sort();
        files.extend(found);
    }
    files
}

/// Parse one file, returning a readable error on failure.
fn check_file(path: &Path, display: &str) -> Result<(), String> {
    let source =
        fs::read_to_string(path).map_err(|e| format!("failed to read file: {}", e))?;
    parse_source(&source, display)
}

/// Parse Python source as a module.
pub fn parse_source(source: &str, source_path: &str) -> Result<(), String> {
    match parse(source, Mode::Module, source_path) {
        Ok(_) => Ok(()),
        Err(e) => {
            let line_offsets = build_line_offsets(source);
            let line = offset_to_line(u32::from(e.offset) as usize, &line_offsets);
            Err(format!("{} ({}, line {})", e.error, source_path, line))
        }
    }
}

/// Byte offset of the start of each line.
fn build_line_offsets(source: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, byte) in source.bytes().enumerate() {
        if byte == b'\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

fn offset_to_line(offset: usize, line_offsets: &[usize]) -> usize {
    match line_offsets.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

//! Plain-text rendering of the end-of-run summary.

use serde_json::Value;

use crate::report::CheckSet;

/// Width of the `=` banner framing the summary.
pub const BANNER_WIDTH: usize = 60;

/// The `=` banner line.
pub fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

/// `project_structure` -> `Project Structure`.
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Lines for every recorded check: title, message, and flattened details for
/// checks that did not pass.
pub fn check_lines(checks: &CheckSet) -> Vec<String> {
    let mut lines = Vec::new();
    for (key, result) in checks.iter() {
        lines.push(String::new());
        lines.push(format!("{}:", title_case(key)));
        lines.push(format!("  {}", result.message));
        if !result.passed() {
            lines.extend(
                flatten_details(&result.details)
                    .into_iter()
                    .map(|line| format!("    {}", line)),
            );
        }
    }
    lines
}

/// `RESULT: x/y checks passed`.
pub fn result_line(passed: usize, total: usize) -> String {
    format!("RESULT: {}/{} checks passed", passed, total)
}

/// Flatten a details value into display lines.
///
/// Mappings give one `key: value` line per entry, lists joined with `, `.
/// Empty lists and nulls are skipped.
pub fn flatten_details(details: &Value) -> Vec<String> {
    match details {
        Value::Null => Vec::new(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::Array(items) if items.is_empty() => None,
                Value::Array(items) => Some(format!("{}: {}", key, join_items(items))),
                other => Some(format!("{}: {}", key, scalar(other))),
            })
            .collect(),
        Value::Array(items) => items.iter().map(item).collect(),
        other => vec![scalar(other)],
    }
}

fn join_items(items: &[Value]) -> String {
    items.iter().map(item).collect::<Vec<_>>().join(", ")
}

fn item(value: &Value) -> String {
    match value {
        Value::Object(map) => map.values().map(scalar).collect::<Vec<_>>().join(": "),
        other => scalar(other),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => join_items(items),
        other => other.to_string(),
    }
}

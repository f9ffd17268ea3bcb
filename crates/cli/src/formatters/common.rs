//! Common utilities for formatters.
//!
//! Responsibilities:
//! - Scalar display of JSON values.
//! - Atomic file writing for `-o/--output`.
//! - Printing rendered output.
//!
//! Does NOT handle:
//! - Format-specific layout (lives in the respective formatter modules).

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Format a JSON value as a string for display.
///
/// Strings are shown without quotes, null as empty, arrays and objects as
/// compact JSON.
pub fn format_json_value(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            serde_json::to_string(v).unwrap_or_default()
        }
    }
}

/// Print rendered output to stdout.
pub fn output_result(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Save a value as pretty-printed JSON, reporting the path on stderr.
pub fn write_json_file(value: &impl Serialize, path: &Path) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    write_to_file(content.as_bytes(), path)
        .with_context(|| format!("Failed to write output to {}", path.display()))?;
    eprintln!("Results saved to {}", path.display());
    Ok(())
}

/// Write bytes to a file atomically.
///
/// Creates parent directories if needed, writes to a temp file in the same
/// directory, then renames over the target.
pub fn write_to_file(content: &[u8], path: &Path) -> Result<()> {
    use std::fs;
    use tempfile::NamedTempFile;

    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let parent_dir = if parent_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent_dir
    };

    if parent_dir != Path::new(".") {
        fs::create_dir_all(parent_dir)
            .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;
    }

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;

    temp_file
        .write_all(content)
        .context("Failed to write to temp file")?;
    temp_file.flush().context("Failed to flush temp file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

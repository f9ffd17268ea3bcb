//! Table formatter implementation.
//!
//! Responsibilities:
//! - Render summary lines, record sections and footer as plain text.
//! - Order each record's fields: priority fields first, then the rest sorted.
//!
//! Does NOT handle:
//! - Other output formats.
//! - File I/O.
//!
//! Invariants:
//! - Keys starting with `_` are never shown.
//! - Null, empty-string and empty-list values are skipped.
//! - Lists show at most `LIST_PREVIEW` values followed by `(+N more)`.

use crate::formatters::common::format_json_value;
use crate::formatters::{Formatter, Report, Section};
use anyhow::Result;
use serde_json::{Map, Value};
use std::fmt::Write;

const LIST_PREVIEW: usize = 5;

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        for (label, value) in &report.summary {
            writeln!(output, "{label}: {value}")?;
        }

        for section in &report.sections {
            format_section(&mut output, section)?;
        }

        if !report.footer.is_empty() {
            writeln!(output)?;
            for line in &report.footer {
                writeln!(output, "{line}")?;
            }
        }

        Ok(output)
    }
}

fn format_section(output: &mut String, section: &Section) -> Result<()> {
    if let Some(title) = &section.title {
        if !output.is_empty() {
            writeln!(output)?;
        }
        writeln!(output, "{title}:")?;
    }

    if section.records.is_empty() {
        if let Some(message) = &section.empty_message {
            writeln!(output, "{message}")?;
        }
        return Ok(());
    }

    let numbered = section.title.is_some() || section.records.len() > 1;
    for (i, record) in section.records.iter().enumerate() {
        if numbered {
            writeln!(output, "\n━━━ Result {} ━━━", i + 1)?;
        }
        format_record(output, record, section.priority)?;
    }
    Ok(())
}

fn format_record(output: &mut String, record: &Value, priority: &[&str]) -> Result<()> {
    let Some(obj) = record.as_object() else {
        writeln!(output, "  {}", format_json_value(record))?;
        return Ok(());
    };

    for (key, value) in ordered_fields(obj, priority) {
        writeln!(output, "  {key}: {}", display_value(value))?;
    }
    Ok(())
}

/// Visible fields of a record in display order.
fn ordered_fields<'a>(obj: &'a Map<String, Value>, priority: &[&str]) -> Vec<(&'a str, &'a Value)> {
    let mut fields: Vec<(&str, &Value)> = priority
        .iter()
        .filter_map(|key| obj.get_key_value(*key))
        .map(|(k, v)| (k.as_str(), v))
        .collect();

    let mut rest: Vec<(&str, &Value)> = obj
        .iter()
        .filter(|(k, _)| !priority.contains(&k.as_str()))
        .map(|(k, v)| (k.as_str(), v))
        .collect();
    rest.sort_by(|a, b| a.0.cmp(b.0));
    fields.extend(rest);

    fields.retain(|(key, value)| !key.starts_with('_') && !is_blank(value));
    fields
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let shown: Vec<String> = items
                .iter()
                .take(LIST_PREVIEW)
                .map(format_json_value)
                .collect();
            let mut text = shown.join(", ");
            if items.len() > LIST_PREVIEW {
                let _ = write!(text, " (+{} more)", items.len() - LIST_PREVIEW);
            }
            text
        }
        other => format_json_value(other),
    }
}

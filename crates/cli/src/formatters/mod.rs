//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Define the `Report` every command builds from an API response.
//! - Render a report as pretty JSON (the raw envelope) or as a human table.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//! - Saving responses to disk (see `common::write_json_file`).
//!
//! Invariants:
//! - JSON output is always the full envelope, never the trimmed table view.
//! - Table output of an empty record set is a human message, not an empty string.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

mod common;
mod json;
mod table;

pub use common::{output_result, write_json_file, write_to_file};
pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// A labelled group of records, e.g. "Results" or "Matches".
#[derive(Debug, Clone, Default)]
pub struct Section {
    pub title: Option<String>,
    /// Fields printed first, in this order, when present.
    pub priority: &'static [&'static str],
    pub records: Vec<Value>,
    pub empty_message: Option<String>,
}

/// Everything a formatter needs to render one command's result.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// The response as received, after envelope normalization.
    pub raw: Value,
    /// `Label: value` lines shown above the records.
    pub summary: Vec<(String, String)>,
    pub sections: Vec<Section>,
    /// Free-form lines shown last (next cursor, hints).
    pub footer: Vec<String>,
}

impl Report {
    pub fn new(raw: impl Serialize) -> Result<Self> {
        Ok(Self {
            raw: serde_json::to_value(raw)?,
            ..Default::default()
        })
    }

    pub fn summary(mut self, label: &str, value: impl ToString) -> Self {
        self.summary.push((label.to_string(), value.to_string()));
        self
    }

    /// Add a summary line only when the value is present.
    pub fn summary_opt<V: ToString>(self, label: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.summary(label, v),
            None => self,
        }
    }

    /// Add a section of serializable records.
    pub fn records<T: Serialize>(
        mut self,
        title: Option<&str>,
        priority: &'static [&'static str],
        records: &[T],
        empty_message: &str,
    ) -> Result<Self> {
        let records = records
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.sections.push(Section {
            title: title.map(str::to_string),
            priority,
            records,
            empty_message: Some(empty_message.to_string()),
        });
        Ok(self)
    }

    /// Show a single object as one record with no "Result N" header.
    pub fn record<T: Serialize>(
        mut self,
        priority: &'static [&'static str],
        record: &T,
    ) -> Result<Self> {
        self.sections.push(Section {
            title: None,
            priority,
            records: vec![serde_json::to_value(record)?],
            empty_message: None,
        });
        Ok(self)
    }

    pub fn footer(mut self, line: impl Into<String>) -> Self {
        self.footer.push(line.into());
        self
    }
}

/// Formatter trait for the supported output formats.
pub trait Formatter {
    fn format_report(&self, report: &Report) -> Result<String>;
}

/// Get a formatter for the given format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}

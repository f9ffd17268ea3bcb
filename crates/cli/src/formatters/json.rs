//! JSON formatter implementation.
//!
//! Prints the report's raw envelope, pretty-printed. Summary lines and
//! sections are ignored.

use crate::formatters::{Formatter, Report};
use anyhow::Result;

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = serde_json::to_string_pretty(&report.raw)?;
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_prints_raw_envelope_only() {
        let report = Report::new(json!({"success": true, "data": {"results": []}}))
            .unwrap()
            .summary("Found", 0)
            .footer("Next cursor: abc");
        let output = JsonFormatter.format_report(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, json!({"success": true, "data": {"results": []}}));
        assert!(!output.contains("Next cursor"));
    }
}

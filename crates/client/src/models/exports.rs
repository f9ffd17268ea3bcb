//! V2 export job models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::common::{JobStatus, ResponseMeta};
use crate::endpoints::query::QueryParams;
use crate::endpoints::url_encoding::encode_path_segment;
use crate::jobs::{ArtifactJob, TrackedJob};
use crate::serde_helpers::opt_u64_lenient;

/// What an export contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    Docs,
    Victims,
}

impl fmt::Display for ExportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Docs => write!(f, "docs"),
            Self::Victims => write!(f, "victims"),
        }
    }
}

impl FromStr for ExportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "docs" => Ok(Self::Docs),
            "victims" => Ok(Self::Victims),
            other => Err(format!(
                "invalid export type '{other}' (expected docs or victims)"
            )),
        }
    }
}

/// File format of an export artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Jsonl,
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jsonl => write!(f, "jsonl"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jsonl" => Ok(Self::Jsonl),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "invalid export format '{other}' (expected jsonl or csv)"
            )),
        }
    }
}

/// Options for creating an export job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub limit: Option<u64>,
    /// Restrict exported columns. Empty means all.
    pub fields: Vec<String>,
    /// Search criteria, passed through to the service as-is (e.g. `{"query": "gmail.com"}`).
    pub search: Option<Map<String, Value>>,
}

/// Body of `POST /service/v2/exports`.
#[derive(Debug, Serialize)]
pub(crate) struct ExportRequest<'a> {
    #[serde(rename = "type")]
    pub export_type: ExportType,
    pub format: ExportFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub fields: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<&'a Map<String, Value>>,
}

impl<'a> ExportRequest<'a> {
    pub fn new(export_type: ExportType, options: &'a ExportOptions) -> Self {
        Self {
            export_type,
            format: options.format,
            limit: options.limit,
            fields: &options.fields,
            search: options.search.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportProgress {
    pub records_done: Option<u64>,
    pub records_total: Option<u64>,
    pub bytes_done: Option<u64>,
    pub percent: Option<f64>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportResult {
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub records: Option<u64>,
    pub format: Option<String>,
    pub expires_at: Option<String>,
    pub download_url: Option<String>,
}

/// State of an export job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<ExportProgress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ExportResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_u64_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_poll_after_ms: Option<u64>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}

impl TrackedJob for ExportJob {
    const KIND: &'static str = "Export";

    fn create_path() -> &'static str {
        "/service/v2/exports"
    }

    fn status_path(job_id: &str) -> String {
        format!("/service/v2/exports/{}", encode_path_segment(job_id))
    }

    fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    fn status(&self) -> Option<&JobStatus> {
        self.status.as_ref()
    }

    fn next_poll_after(&self) -> Option<Duration> {
        self.next_poll_after_ms.map(Duration::from_millis)
    }
}

impl ArtifactJob for ExportJob {
    fn download_request(job_id: &str) -> (String, QueryParams) {
        (
            format!("/service/v2/exports/{}/download", encode_path_segment(job_id)),
            QueryParams::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_export_request_body() {
        let mut search = Map::new();
        search.insert("query".into(), json!("gmail.com"));
        let options = ExportOptions {
            limit: Some(100),
            search: Some(search),
            ..Default::default()
        };
        let body = serde_json::to_value(ExportRequest::new(ExportType::Docs, &options)).unwrap();
        assert_eq!(
            body,
            json!({
                "type": "docs",
                "format": "jsonl",
                "limit": 100,
                "search": {"query": "gmail.com"}
            })
        );
    }

    #[test]
    fn test_export_type_and_format_parse() {
        assert_eq!("Victims".parse::<ExportType>().unwrap(), ExportType::Victims);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}

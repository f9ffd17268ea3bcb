//! V2 file-search job models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use oathnet_config::constants::{DEFAULT_CONTEXT_LINES, DEFAULT_MAX_MATCHES};

use super::common::{JobStatus, ResponseMeta};
use crate::endpoints::url_encoding::encode_path_segment;
use crate::jobs::TrackedJob;
use crate::serde_helpers::opt_u64_lenient;

/// How the expression is matched against file contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Literal,
    Regex,
    Wildcard,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => write!(f, "literal"),
            Self::Regex => write!(f, "regex"),
            Self::Wildcard => write!(f, "wildcard"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "literal" => Ok(Self::Literal),
            "regex" => Ok(Self::Regex),
            "wildcard" => Ok(Self::Wildcard),
            other => Err(format!(
                "invalid search mode '{other}' (expected literal, regex or wildcard)"
            )),
        }
    }
}

/// Options for creating a file-search job.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSearchOptions {
    pub search_mode: SearchMode,
    pub include_matches: bool,
    pub case_sensitive: bool,
    pub context_lines: u32,
    pub max_matches: u32,
    /// Restrict the search to these log bundles. Empty means all.
    pub log_ids: Vec<String>,
    /// Glob restricting which files are scanned.
    pub file_pattern: Option<String>,
}

impl Default for FileSearchOptions {
    fn default() -> Self {
        Self {
            search_mode: SearchMode::Literal,
            include_matches: true,
            case_sensitive: false,
            context_lines: DEFAULT_CONTEXT_LINES,
            max_matches: DEFAULT_MAX_MATCHES,
            log_ids: Vec::new(),
            file_pattern: None,
        }
    }
}

/// Body of `POST /service/v2/file-search`.
#[derive(Debug, Serialize)]
pub(crate) struct FileSearchRequest<'a> {
    pub expression: &'a str,
    pub search_mode: SearchMode,
    pub include_matches: bool,
    pub case_sensitive: bool,
    pub context_lines: u32,
    pub max_matches: u32,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub log_ids: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_pattern: Option<&'a str>,
}

impl<'a> FileSearchRequest<'a> {
    pub fn new(expression: &'a str, options: &'a FileSearchOptions) -> Self {
        Self {
            expression,
            search_mode: options.search_mode,
            include_matches: options.include_matches,
            case_sensitive: options.case_sensitive,
            context_lines: options.context_lines,
            max_matches: options.max_matches,
            log_ids: &options.log_ids,
            file_pattern: options.file_pattern.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSearchSnippet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSearchMatch {
    pub log_id: String,
    pub file_id: String,
    pub file_name: String,
    #[serde(default)]
    pub relative_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_range: Option<ColumnRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<FileSearchSnippet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSearchProgress {
    pub logs_total: Option<u64>,
    pub logs_completed: Option<u64>,
    pub files_total: Option<u64>,
    pub files_scanned: Option<u64>,
    pub percent: Option<f64>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSearchSummary {
    pub files_total: Option<u64>,
    pub files_scanned: Option<u64>,
    pub files_matched: Option<u64>,
    pub matches: Option<u64>,
    pub duration_ms: Option<u64>,
    pub bytes_scanned: Option<u64>,
    pub budget_exceeded: Option<bool>,
    pub truncated: Option<bool>,
    pub timeouts: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSearchLimits {
    pub byte_budget_bytes: Option<u64>,
    pub job_ttl_seconds: Option<u64>,
    pub max_context_lines: Option<u64>,
    pub max_expression_length: Option<u64>,
    pub max_file_size_bytes: Option<u64>,
    pub max_log_ids: Option<u64>,
    pub max_matches: Option<u64>,
}

/// State of a file-search job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSearchJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<FileSearchProgress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<FileSearchSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<FileSearchLimits>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<FileSearchMatch>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}

impl TrackedJob for FileSearchJob {
    const KIND: &'static str = "File search";

    fn create_path() -> &'static str {
        "/service/v2/file-search"
    }

    fn status_path(job_id: &str) -> String {
        format!("/service/v2/file-search/{}", encode_path_segment(job_id))
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

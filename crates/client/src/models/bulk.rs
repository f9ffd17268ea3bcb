//! Bulk search job models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::common::JobStatus;
use crate::endpoints::query::QueryParams;
use crate::endpoints::url_encoding::encode_path_segment;
use crate::jobs::{ArtifactJob, TrackedJob};
use crate::serde_helpers::opt_u64_lenient;

/// Which database a bulk job searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkTarget {
    Breach,
    Stealer,
}

impl fmt::Display for BulkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Breach => write!(f, "breach"),
            Self::Stealer => write!(f, "stealer"),
        }
    }
}

impl FromStr for BulkTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breach" => Ok(Self::Breach),
            "stealer" => Ok(Self::Stealer),
            other => Err(format!(
                "invalid bulk service '{other}' (expected breach or stealer)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for BulkFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "invalid bulk format '{other}' (expected json or csv)"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkOptions {
    pub format: BulkFormat,
    pub dbnames: Vec<String>,
}

/// Body of `POST /service/bulk-search`.
#[derive(Debug, Serialize)]
pub(crate) struct BulkRequest<'a> {
    pub terms: &'a [String],
    pub service: BulkTarget,
    pub format: BulkFormat,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub dbnames: &'a [String],
}

/// State of a bulk search job.
///
/// Older deployments report the identifier as `id` instead of `job_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(
        default,
        deserialize_with = "opt_u64_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_poll_after_ms: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrackedJob for BulkJob {
    const KIND: &'static str = "Bulk";

    fn create_path() -> &'static str {
        "/service/bulk-search"
    }

    fn status_path(job_id: &str) -> String {
        format!("/service/bulk-search/{}/status", encode_path_segment(job_id))
    }

    fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref().or(self.id.as_deref())
    }

    fn status(&self) -> Option<&JobStatus> {
        self.status.as_ref()
    }

    fn next_poll_after(&self) -> Option<Duration> {
        self.next_poll_after_ms.map(Duration::from_millis)
    }
}

impl ArtifactJob for BulkJob {
    fn download_request(job_id: &str) -> (String, QueryParams) {
        let mut query = QueryParams::new();
        query.push("job_id", job_id);
        ("/service/bulk-search/download".to_string(), query)
    }
}

/// A page of the caller's bulk jobs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkJobList {
    #[serde(default, alias = "results", alias = "items")]
    pub jobs: Vec<BulkJob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

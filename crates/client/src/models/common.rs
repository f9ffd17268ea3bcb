//! Types shared across response models.
//!
//! This module contains the `_meta` block most endpoints attach, the v2
//! search metadata, and the job status enum. It does NOT contain
//! resource-specific models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account and request metadata returned under `_meta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<MetaUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookups: Option<MetaLookups>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<MetaService>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<MetaPerformance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaUser {
    pub plan: Option<String>,
    pub plan_type: Option<String>,
    pub is_plan_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaLookups {
    pub used_today: Option<u64>,
    pub left_today: Option<u64>,
    pub daily_limit: Option<u64>,
    pub is_unlimited: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaService {
    pub name: Option<String>,
    pub id: Option<String>,
    pub category: Option<String>,
    pub is_premium: Option<bool>,
    pub is_available: Option<bool>,
    pub session_quota: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaPerformance {
    pub duration_ms: Option<f64>,
    pub timestamp: Option<String>,
}

/// Paging metadata on v2 search responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V2SearchMeta {
    pub total: Option<u64>,
    pub count: Option<u64>,
    pub took_ms: Option<u64>,
    pub has_more: Option<bool>,
    pub total_pages: Option<u64>,
    pub max_score: Option<f64>,
}

/// Lifecycle state of a server-side job.
///
/// Parsed case-insensitively: `completed`, `COMPLETED` and `Completed` are the
/// same state. Unrecognized spellings are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Canceled,
    Failed,
    Other(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "queued" | "pending" => Self::Queued,
            "running" | "processing" => Self::Running,
            "completed" | "complete" => Self::Completed,
            "canceled" | "cancelled" => Self::Canceled,
            "failed" => Self::Failed,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Terminal states never transition again; polling stops on them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled | Self::Failed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::Failed => "failed",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

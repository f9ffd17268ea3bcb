//! Utility endpoint models (health, analytics).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::envelope::Envelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
    Down,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyHealth {
    pub status: String,
}

/// Service health from `GET /service/v2/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct V2HealthData {
    pub status: HealthStatus,
    #[serde(default)]
    pub checked_at_utc: String,
    /// Keyed by dependency name (`redis`, `s3`, ...).
    #[serde(default)]
    pub dependencies: BTreeMap<String, DependencyHealth>,
}

/// Response format for the analytics endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalyticsFormat {
    #[default]
    Json,
    Html,
}

impl AnalyticsFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V2AnalyticsDayStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub docs: u64,
    #[serde(default)]
    pub victims: u64,
    pub emails: Option<u64>,
    pub ips: Option<u64>,
    pub discord_ids: Option<u64>,
    pub hwids: Option<u64>,
}

/// Index statistics from `GET /service/v2/analytics/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V2AnalyticsData {
    #[serde(default)]
    pub totals: V2AnalyticsDayStats,
    #[serde(default)]
    pub past_hour: V2AnalyticsDayStats,
    #[serde(default)]
    pub last_7_days: Vec<V2AnalyticsDayStats>,
    #[serde(default)]
    pub updated_at: String,
}

/// Result of an analytics call in the requested format.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsReport {
    Stats(Envelope<V2AnalyticsData>),
    /// Rendered dashboard, returned as the server sent it.
    Html(String),
}

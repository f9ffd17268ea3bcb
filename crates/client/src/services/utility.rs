//! Autocomplete, health and analytics endpoints.

use std::sync::Arc;

use crate::client::transport::Transport;
use crate::endpoints::QueryParams;
use crate::error::Result;
use crate::models::{AnalyticsFormat, AnalyticsReport, Envelope, V2HealthData};

const ANALYTICS_PATH: &str = "/service/v2/analytics/stats";

#[derive(Debug, Clone)]
pub struct UtilityService {
    transport: Arc<Transport>,
}

impl UtilityService {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Database names starting with `query`. The endpoint returns a bare list.
    pub async fn dbname_autocomplete(&self, query: &str) -> Result<Vec<String>> {
        let mut params = QueryParams::new();
        params.push("q", query);
        self.transport
            .get("/service/dbname-autocomplete", &params)
            .await
    }

    /// Service and dependency health.
    pub async fn health(&self) -> Result<Envelope<V2HealthData>> {
        self.transport
            .get_envelope("/service/v2/health", &QueryParams::new())
            .await
    }

    /// Index statistics, either as data or as the server-rendered HTML page.
    pub async fn analytics(&self, format: AnalyticsFormat) -> Result<AnalyticsReport> {
        let mut params = QueryParams::new();
        params.push("format", format.as_str());
        match format {
            AnalyticsFormat::Json => self
                .transport
                .get_envelope(ANALYTICS_PATH, &params)
                .await
                .map(AnalyticsReport::Stats),
            AnalyticsFormat::Html => self
                .transport
                .get_raw(ANALYTICS_PATH, &params)
                .await
                .map(|body| AnalyticsReport::Html(body.text())),
        }
    }
}

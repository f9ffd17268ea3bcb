//! OathNet API client.
//!
//! This crate provides a typed async client for the OathNet breach and OSINT
//! search API: response envelope normalization, cursor pagination, and a
//! shared create/poll/download lifecycle for file-search, export and bulk jobs.

pub mod client;
pub mod download;
pub mod endpoints;
pub mod error;
pub mod jobs;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod pagination;
mod serde_helpers;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use client::OathNetClient;
pub use client::builder::OathNetClientBuilder;
pub use client::transport::Transport;
pub use endpoints::{QueryParams, RawBody};
pub use error::{ClientError, Result};
pub use jobs::{ArtifactJob, JobController, PollPolicy, TrackedJob};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{
    AnalyticsFormat, AnalyticsReport, BreachSearchData, BulkFormat, BulkJob, BulkJobList,
    BulkOptions, BulkTarget, Envelope, ExportFormat, ExportJob, ExportOptions, ExportType,
    FileSearchJob, FileSearchOptions, JobStatus, SearchMode, V2HealthData, V2StealerData,
    V2VictimsData, VictimManifest,
};
pub use serde_helpers::OneOrMany;
pub use services::{
    BreachSearchOptions, LegacyStealerOptions, RobloxLookup, StealerSearchOptions,
    VictimsSearchOptions,
};

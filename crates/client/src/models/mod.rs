//! Data models for OathNet API responses and request options.
//!
//! Each submodule covers one API area. Everything callers need is re-exported
//! here so `oathnet_client::models::*` is the single import point.

pub mod bulk;
pub mod common;
pub mod envelope;
pub mod exports;
pub mod file_search;
pub mod osint;
pub mod search;
pub mod stealer;
pub mod utility;
pub mod victims;

pub use bulk::{BulkFormat, BulkJob, BulkJobList, BulkOptions, BulkTarget};
pub(crate) use bulk::BulkRequest;
pub use common::{
    JobStatus, MetaLookups, MetaPerformance, MetaService, MetaUser, ResponseMeta, V2SearchMeta,
};
pub use envelope::Envelope;
pub use exports::{
    ExportFormat, ExportJob, ExportOptions, ExportProgress, ExportResult, ExportType,
};
pub(crate) use exports::ExportRequest;
pub use file_search::{
    ColumnRange, FileSearchJob, FileSearchLimits, FileSearchMatch, FileSearchOptions,
    FileSearchProgress, FileSearchSnippet, FileSearchSummary, SearchMode,
};
pub(crate) use file_search::FileSearchRequest;
pub use osint::{
    DiscordToRobloxData, DiscordUserData, DiscordUsernameHistoryData,
    DiscordUsernameHistoryEntry, ExtractSubdomainData, GhuntData, GhuntProfile, HoleheData,
    IpInfoData, MinecraftHistoryData, MinecraftHistoryEntry, RobloxUserData, SteamMeta,
    SteamProfileData, SteamRawData, XboxGameHistory, XboxMeta, XboxProfileData,
    XboxProfileDetails, XboxScoreDetails, XboxScraperData,
};
pub use search::{
    BreachResult, BreachSearchData, DailyLookups, SearchSession, SearchSessionData,
    SearchSessionUser, StealerResult, StealerSearchData,
};
pub use stealer::{SubdomainData, V2StealerData, V2StealerResult};
pub use utility::{
    AnalyticsFormat, AnalyticsReport, DependencyHealth, HealthStatus, V2AnalyticsData,
    V2AnalyticsDayStats, V2HealthData,
};
pub use victims::{
    ManifestFile, ManifestNodeKind, V2VictimResult, V2VictimsData, VictimManifest,
    VictimManifestNode,
};

//! Centralized constants for the OathNet workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default API base URL. All request paths are relative to it.
pub const DEFAULT_BASE_URL: &str = "https://oathnet.org/api";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_API_KEY: &str = "OATHNET_API_KEY";
pub const ENV_BASE_URL: &str = "OATHNET_BASE_URL";
pub const ENV_TIMEOUT: &str = "OATHNET_TIMEOUT";

/// Set to `1` or `true` to skip `.env` loading (used by tests).
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";

// =============================================================================
// Job Polling Defaults
// =============================================================================

/// Default interval between file-search and export status polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Bulk jobs are slower; they poll less often by default.
pub const DEFAULT_BULK_POLL_INTERVAL_MS: u64 = 5000;

/// Default wait budget for file-search jobs (5 minutes).
pub const DEFAULT_FILE_SEARCH_TIMEOUT_MS: u64 = 300_000;

/// Default wait budget for export jobs (10 minutes).
pub const DEFAULT_EXPORT_TIMEOUT_MS: u64 = 600_000;

/// Default wait budget for bulk jobs (10 minutes).
pub const DEFAULT_BULK_TIMEOUT_MS: u64 = 600_000;

// =============================================================================
// Search Defaults
// =============================================================================

/// Default page size used by the CLI for v2 searches.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Default number of context lines around a file-search match.
pub const DEFAULT_CONTEXT_LINES: u32 = 2;

/// Default maximum number of file-search matches.
pub const DEFAULT_MAX_MATCHES: u32 = 100;

/// Default page for bulk job listings.
pub const DEFAULT_BULK_LIST_PAGE: u32 = 1;

/// Default page size for bulk job listings.
pub const DEFAULT_BULK_LIST_PAGE_SIZE: u32 = 10;

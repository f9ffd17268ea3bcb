//! Resource clients, one per API area.
//!
//! Every service is a thin, stateless request builder over the shared
//! [`Transport`](crate::client::transport::Transport): it turns typed options
//! into a path plus query or body, sends it, and returns an
//! [`Envelope`](crate::models::Envelope).
//!
//! # What this module does NOT handle:
//! - Error classification (see [`crate::error`])
//! - Poll timing for async jobs (see [`crate::jobs`])

pub mod bulk;
pub mod exports;
pub mod file_search;
pub mod osint;
pub mod search;
pub mod stealer;
pub mod utility;
pub mod victims;

pub use bulk::BulkService;
pub use exports::ExportService;
pub use file_search::FileSearchService;
pub use osint::{OsintService, RobloxLookup};
pub use search::{BreachSearchOptions, LegacyStealerOptions, SearchService};
pub use stealer::{StealerSearchOptions, StealerService};
pub use utility::UtilityService;
pub use victims::{VictimsSearchOptions, VictimsService};

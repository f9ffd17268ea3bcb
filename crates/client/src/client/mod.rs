//! The OathNet client facade.
//!
//! [`OathNetClient`] owns one shared [`Transport`](transport::Transport) and
//! hands out the resource services built on top of it.
//!
//! # Submodules
//! - [`builder`]: client construction and configuration
//! - [`transport`]: authenticated HTTP requests
//!
//! # What this module does NOT handle:
//! - Request construction for individual endpoints (see [`crate::services`])
//! - Job polling (see [`crate::jobs`])
//!
//! # Invariants
//! - Each service is constructed at most once per client, on first access.
//! - Every service of a client, and every clone of it, shares the same transport.

pub mod builder;
pub mod transport;

use std::sync::{Arc, OnceLock};

use oathnet_config::Config;

use crate::error::Result;
use crate::services::{
    BulkService, ExportService, FileSearchService, OsintService, SearchService, StealerService,
    UtilityService, VictimsService,
};
use builder::OathNetClientBuilder;
use transport::Transport;

#[derive(Debug, Default)]
struct Services {
    search: OnceLock<SearchService>,
    osint: OnceLock<OsintService>,
    stealer: OnceLock<StealerService>,
    victims: OnceLock<VictimsService>,
    file_search: OnceLock<FileSearchService>,
    exports: OnceLock<ExportService>,
    bulk: OnceLock<BulkService>,
    utility: OnceLock<UtilityService>,
}

/// OathNet API client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use oathnet_client::OathNetClient;
///
/// let client = OathNetClient::builder()
///     .api_key("your-api-key")
///     .build()?;
///
/// let results = client.search().breach("user@example.com", &Default::default()).await?;
/// ```
///
/// Cloning is cheap and clones share both the transport and the services.
#[derive(Debug, Clone)]
pub struct OathNetClient {
    transport: Arc<Transport>,
    services: Arc<Services>,
}

impl OathNetClient {
    /// Create a new client builder.
    pub fn builder() -> OathNetClientBuilder {
        OathNetClientBuilder::new()
    }

    /// Build a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::builder().from_config(config).build()
    }

    pub(crate) fn from_transport(transport: Transport) -> Self {
        Self {
            transport: Arc::new(transport),
            services: Arc::new(Services::default()),
        }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// The shared transport, for endpoints without a dedicated service method.
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// Legacy breach/stealer search and search sessions.
    pub fn search(&self) -> &SearchService {
        self.services
            .search
            .get_or_init(|| SearchService::new(Arc::clone(&self.transport)))
    }

    /// Single-identifier OSINT lookups.
    pub fn osint(&self) -> &OsintService {
        self.services
            .osint
            .get_or_init(|| OsintService::new(Arc::clone(&self.transport)))
    }

    /// V2 stealer search.
    pub fn stealer(&self) -> &StealerService {
        self.services
            .stealer
            .get_or_init(|| StealerService::new(Arc::clone(&self.transport)))
    }

    /// Victim profiles and their files.
    pub fn victims(&self) -> &VictimsService {
        self.services
            .victims
            .get_or_init(|| VictimsService::new(Arc::clone(&self.transport)))
    }

    /// File-search jobs.
    pub fn file_search(&self) -> &FileSearchService {
        self.services
            .file_search
            .get_or_init(|| FileSearchService::new(Arc::clone(&self.transport)))
    }

    /// Export jobs.
    pub fn exports(&self) -> &ExportService {
        self.services
            .exports
            .get_or_init(|| ExportService::new(Arc::clone(&self.transport)))
    }

    /// Bulk search jobs.
    pub fn bulk(&self) -> &BulkService {
        self.services
            .bulk
            .get_or_init(|| BulkService::new(Arc::clone(&self.transport)))
    }

    /// Autocomplete, health and analytics.
    pub fn utility(&self) -> &UtilityService {
        self.services
            .utility
            .get_or_init(|| UtilityService::new(Arc::clone(&self.transport)))
    }
}

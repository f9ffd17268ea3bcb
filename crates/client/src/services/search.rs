//! Legacy breach and stealer search, plus search sessions.

use std::sync::Arc;

use futures::Stream;

use crate::client::transport::Transport;
use crate::endpoints::QueryParams;
use crate::error::Result;
use crate::models::{BreachSearchData, Envelope, SearchSessionData, StealerSearchData};
use crate::pagination;

/// Options for `GET /service/search-breach`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreachSearchOptions {
    pub cursor: Option<String>,
    /// Comma-separated database names to restrict the search to.
    pub dbnames: Option<String>,
    /// Session id from [`SearchService::init_session`], to share one quota charge.
    pub search_id: Option<String>,
}

/// Options for `GET /service/search-stealer`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyStealerOptions {
    pub cursor: Option<String>,
    pub dbnames: Option<String>,
    pub search_id: Option<String>,
}

fn legacy_query(
    query: &str,
    cursor: Option<&str>,
    dbnames: Option<&str>,
    search_id: Option<&str>,
) -> QueryParams {
    let mut params = QueryParams::new();
    params
        .push("q", query)
        .push_opt("cursor", cursor.filter(|s| !s.is_empty()))
        .push_opt("dbnames", dbnames.filter(|s| !s.is_empty()))
        .push_opt("search_id", search_id.filter(|s| !s.is_empty()));
    params
}

#[derive(Debug, Clone)]
pub struct SearchService {
    transport: Arc<Transport>,
}

impl SearchService {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Open a search session for `query`.
    pub async fn init_session(&self, query: &str) -> Result<Envelope<SearchSessionData>> {
        self.transport
            .post_envelope(
                "/service/search/init",
                &serde_json::json!({ "query": query }),
            )
            .await
    }

    /// Search breach databases.
    pub async fn breach(
        &self,
        query: &str,
        options: &BreachSearchOptions,
    ) -> Result<Envelope<BreachSearchData>> {
        let params = legacy_query(
            query,
            options.cursor.as_deref(),
            options.dbnames.as_deref(),
            options.search_id.as_deref(),
        );
        self.transport
            .get_envelope("/service/search-breach", &params)
            .await
    }

    /// Search stealer logs through the legacy endpoint.
    pub async fn stealer(
        &self,
        query: &str,
        options: &LegacyStealerOptions,
    ) -> Result<Envelope<StealerSearchData>> {
        let params = legacy_query(
            query,
            options.cursor.as_deref(),
            options.dbnames.as_deref(),
            options.search_id.as_deref(),
        );
        self.transport
            .get_envelope("/service/search-stealer", &params)
            .await
    }

    /// Breach search pages, following `cursor` from `options.cursor` onwards.
    pub fn breach_pages<'a>(
        &'a self,
        query: &'a str,
        options: &'a BreachSearchOptions,
    ) -> impl Stream<Item = Result<Envelope<BreachSearchData>>> + 'a {
        pagination::pages(options.cursor.clone(), move |cursor| {
            let page_options = BreachSearchOptions {
                cursor,
                ..options.clone()
            };
            async move { self.breach(query, &page_options).await }
        })
    }
}

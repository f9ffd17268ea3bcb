//! V2 stealer log search.

use std::sync::Arc;

use futures::Stream;

use crate::client::transport::Transport;
use crate::endpoints::QueryParams;
use crate::error::Result;
use crate::models::{Envelope, SubdomainData, V2StealerData};
use crate::pagination;

/// Filters for `GET /service/v2/stealer/search`.
///
/// List fields are sent as repeated `name[]` keys; empty lists are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StealerSearchOptions {
    pub cursor: Option<String>,
    pub page_size: Option<u32>,
    pub sort: Option<String>,
    pub wildcard: Option<bool>,
    pub log_id: Option<String>,
    pub has_log_id: Option<bool>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub search_id: Option<String>,
    pub domains: Vec<String>,
    pub subdomains: Vec<String>,
    pub usernames: Vec<String>,
    pub passwords: Vec<String>,
    pub paths: Vec<String>,
    pub fields: Vec<String>,
}

impl StealerSearchOptions {
    pub(crate) fn to_query(&self, query: &str) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_non_empty("q", query)
            .push_opt("cursor", self.cursor.as_deref())
            .push_opt("page_size", self.page_size)
            .push_opt("sort", self.sort.as_deref())
            .push_opt("wildcard", self.wildcard)
            .push_opt("log_id", self.log_id.as_deref())
            .push_opt("has_log_id", self.has_log_id)
            .push_opt("from", self.from.as_deref())
            .push_opt("to", self.to.as_deref())
            .push_opt("search_id", self.search_id.as_deref())
            .push_array("domain", &self.domains)
            .push_array("subdomain", &self.subdomains)
            .push_array("username", &self.usernames)
            .push_array("password", &self.passwords)
            .push_array("path", &self.paths)
            .push_array("fields", &self.fields);
        params
    }
}

#[derive(Debug, Clone)]
pub struct StealerService {
    transport: Arc<Transport>,
}

impl StealerService {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Search stealer credentials. An empty `query` searches by filters only.
    pub async fn search(
        &self,
        query: &str,
        options: &StealerSearchOptions,
    ) -> Result<Envelope<V2StealerData>> {
        self.transport
            .get_envelope("/service/v2/stealer/search", &options.to_query(query))
            .await
    }

    /// Subdomains of `domain` seen in stealer logs.
    pub async fn subdomain(
        &self,
        domain: &str,
        query: Option<&str>,
    ) -> Result<Envelope<SubdomainData>> {
        let mut params = QueryParams::new();
        params
            .push("domain", domain)
            .push_opt("q", query.filter(|q| !q.is_empty()));
        self.transport
            .get_envelope("/service/v2/stealer/subdomain", &params)
            .await
    }

    /// Search result pages, following `next_cursor` from `options.cursor` onwards.
    pub fn search_pages<'a>(
        &'a self,
        query: &'a str,
        options: &'a StealerSearchOptions,
    ) -> impl Stream<Item = Result<Envelope<V2StealerData>>> + 'a {
        pagination::pages(options.cursor.clone(), move |cursor| {
            let page_options = StealerSearchOptions {
                cursor,
                ..options.clone()
            };
            async move { self.search(query, &page_options).await }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_orders_scalars_before_arrays() {
        let options = StealerSearchOptions {
            page_size: Some(25),
            wildcard: Some(false),
            domains: vec!["a.com".to_string(), "b.com".to_string()],
            fields: vec!["email".to_string()],
            ..Default::default()
        };
        let params = options.to_query("");
        assert_eq!(
            params.as_slice(),
            &[
                ("page_size".to_string(), "25".to_string()),
                ("wildcard".to_string(), "false".to_string()),
                ("domain[]".to_string(), "a.com".to_string()),
                ("domain[]".to_string(), "b.com".to_string()),
                ("fields[]".to_string(), "email".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_query_is_omitted() {
        let params = StealerSearchOptions::default().to_query("");
        assert!(params.is_empty());
        let params = StealerSearchOptions::default().to_query("gmail.com");
        assert_eq!(params.get_all("q").collect::<Vec<_>>(), vec!["gmail.com"]);
    }
}

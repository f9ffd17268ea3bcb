//! Victim profile search, manifests and file retrieval.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::Stream;

use crate::client::transport::Transport;
use crate::download;
use crate::endpoints::{QueryParams, RawBody, encode_path_segment};
use crate::error::Result;
use crate::models::{Envelope, V2VictimsData, VictimManifest};
use crate::pagination;

/// Filters for `GET /service/v2/victims/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VictimsSearchOptions {
    pub cursor: Option<String>,
    pub page_size: Option<u32>,
    pub sort: Option<String>,
    pub wildcard: Option<bool>,
    pub log_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub total_docs_min: Option<u64>,
    pub total_docs_max: Option<u64>,
    pub search_id: Option<String>,
    pub emails: Vec<String>,
    pub ips: Vec<String>,
    pub hwids: Vec<String>,
    pub discord_ids: Vec<String>,
    pub usernames: Vec<String>,
    pub fields: Vec<String>,
}

impl VictimsSearchOptions {
    pub(crate) fn to_query(&self, query: &str) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_non_empty("q", query)
            .push_opt("cursor", self.cursor.as_deref())
            .push_opt("page_size", self.page_size)
            .push_opt("sort", self.sort.as_deref())
            .push_opt("wildcard", self.wildcard)
            .push_opt("log_id", self.log_id.as_deref())
            .push_opt("from", self.from.as_deref())
            .push_opt("to", self.to.as_deref())
            .push_opt("total_docs_min", self.total_docs_min)
            .push_opt("total_docs_max", self.total_docs_max)
            .push_opt("search_id", self.search_id.as_deref())
            .push_array("email", &self.emails)
            .push_array("ip", &self.ips)
            .push_array("hwid", &self.hwids)
            .push_array("discord_id", &self.discord_ids)
            .push_array("username", &self.usernames)
            .push_array("fields", &self.fields);
        params
    }
}

#[derive(Debug, Clone)]
pub struct VictimsService {
    transport: Arc<Transport>,
}

impl VictimsService {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Search victim profiles. An empty `query` searches by filters only.
    pub async fn search(
        &self,
        query: &str,
        options: &VictimsSearchOptions,
    ) -> Result<Envelope<V2VictimsData>> {
        self.transport
            .get_envelope("/service/v2/victims/search", &options.to_query(query))
            .await
    }

    /// File tree of one victim log bundle.
    ///
    /// The endpoint answers with the bare manifest; it is always wrapped.
    pub async fn manifest(&self, log_id: &str) -> Result<Envelope<VictimManifest>> {
        let path = format!("/service/v2/victims/{}", encode_path_segment(log_id));
        let manifest: VictimManifest = self.transport.get(&path, &QueryParams::new()).await?;
        Ok(Envelope::ok(manifest))
    }

    /// Raw content of one file from a victim log bundle.
    pub async fn file(&self, log_id: &str, file_id: &str) -> Result<RawBody> {
        let path = format!(
            "/service/v2/victims/{}/files/{}",
            encode_path_segment(log_id),
            encode_path_segment(file_id)
        );
        self.transport.get_raw(&path, &QueryParams::new()).await
    }

    /// The whole victim log bundle as an archive.
    pub async fn archive(&self, log_id: &str) -> Result<RawBody> {
        let path = format!(
            "/service/v2/victims/{}/archive",
            encode_path_segment(log_id)
        );
        self.transport.get_raw(&path, &QueryParams::new()).await
    }

    /// Download the archive to `path`, returning the absolute path written.
    pub async fn archive_to(&self, log_id: &str, path: impl AsRef<Path>) -> Result<PathBuf> {
        let body = self.archive(log_id).await?;
        download::write_atomic(path.as_ref(), body.bytes).await
    }

    /// Search result pages, following `next_cursor` from `options.cursor` onwards.
    pub fn search_pages<'a>(
        &'a self,
        query: &'a str,
        options: &'a VictimsSearchOptions,
    ) -> impl Stream<Item = Result<Envelope<V2VictimsData>>> + 'a {
        pagination::pages(options.cursor.clone(), move |cursor| {
            let page_options = VictimsSearchOptions {
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
    fn test_query_includes_doc_bounds_and_arrays() {
        let options = VictimsSearchOptions {
            total_docs_min: Some(10),
            emails: vec!["a@x.io".to_string()],
            discord_ids: vec!["1".to_string(), "2".to_string()],
            ..Default::default()
        };
        let params = options.to_query("x.io");
        assert_eq!(params.get_all("q").collect::<Vec<_>>(), vec!["x.io"]);
        assert_eq!(params.get_all("total_docs_min").collect::<Vec<_>>(), vec!["10"]);
        assert_eq!(params.get_all("total_docs_max").count(), 0);
        assert_eq!(params.get_all("email[]").collect::<Vec<_>>(), vec!["a@x.io"]);
        assert_eq!(
            params.get_all("discord_id[]").collect::<Vec<_>>(),
            vec!["1", "2"]
        );
    }
}

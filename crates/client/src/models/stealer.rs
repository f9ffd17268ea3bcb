//! V2 stealer search models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{ResponseMeta, V2SearchMeta};

/// One credential record from a stealer log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V2StealerResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subdomain: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_domains: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pwned_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A page of v2 stealer results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V2StealerData {
    #[serde(default)]
    pub items: Vec<V2StealerResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<V2SearchMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}

impl V2StealerData {
    /// Distinct log ids on this page, in first-seen order.
    pub fn log_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in self.items.iter().filter_map(|i| i.log_id.as_ref()) {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubdomainData {
    #[serde(default)]
    pub subdomains: Vec<String>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub domain: String,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}

//! Legacy breach and stealer search models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::ResponseMeta;
use crate::serde_helpers::OneOrMany;

/// Search session returned by `POST /service/search/init`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSession {
    pub id: String,
    #[serde(default)]
    pub query: String,
    pub search_type: Option<String>,
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLookups {
    pub used: Option<u64>,
    pub remaining: Option<u64>,
    pub limit: Option<u64>,
    pub is_unlimited: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSessionUser {
    pub plan: Option<String>,
    pub plan_type: Option<String>,
    pub is_plan_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_lookups: Option<DailyLookups>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSessionData {
    pub session: SearchSession,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SearchSessionUser>,
}

/// One breach record. Databases differ wildly, so unknown columns are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreachResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreachSearchData {
    #[serde(default)]
    pub results: Vec<BreachResult>,
    #[serde(default)]
    pub results_found: u64,
    #[serde(default)]
    pub results_shown: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}

/// One legacy stealer record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StealerResult {
    #[serde(rename = "LOG", default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub username: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub password: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub url: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StealerSearchData {
    #[serde(default)]
    pub results: Vec<StealerResult>,
    #[serde(default)]
    pub results_found: u64,
    #[serde(default)]
    pub results_shown: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}

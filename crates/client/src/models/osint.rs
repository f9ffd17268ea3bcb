//! OSINT lookup models.
//!
//! These payloads come from third-party sources relayed by the API, so most
//! fields are optional and unknown keys are kept in `extra` where the upstream
//! shape is open-ended.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::ResponseMeta;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpInfoData {
    pub status: Option<String>,
    pub query: Option<String>,
    pub continent: Option<String>,
    pub continent_code: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub region: Option<String>,
    pub region_name: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub zip: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub timezone: Option<String>,
    pub offset: Option<i64>,
    pub currency: Option<String>,
    pub isp: Option<String>,
    pub org: Option<String>,
    pub asname: Option<String>,
    pub mobile: Option<bool>,
    pub proxy: Option<bool>,
    pub hosting: Option<bool>,
    pub reverse: Option<String>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SteamRawData {
    pub steamid: Option<String>,
    pub communityvisibilitystate: Option<i64>,
    pub profilestate: Option<i64>,
    pub personaname: Option<String>,
    pub profileurl: Option<String>,
    pub avatar: Option<String>,
    pub avatarmedium: Option<String>,
    pub avatarfull: Option<String>,
    pub avatarhash: Option<String>,
    pub personastate: Option<i64>,
    pub primaryclanid: Option<String>,
    pub timecreated: Option<i64>,
    pub personastateflags: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SteamMeta {
    pub username: Option<String>,
    pub id: Option<String>,
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<SteamRawData>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SteamProfileData {
    pub username: Option<String>,
    pub id: Option<String>,
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<SteamMeta>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XboxScoreDetails {
    pub achieved: Option<u64>,
    pub total: Option<u64>,
    pub achievements_unlocked: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XboxGameHistory {
    pub title: Option<String>,
    pub cover_image: Option<String>,
    pub last_played: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    pub score_details: Option<XboxScoreDetails>,
    pub completion_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XboxProfileDetails {
    pub gamerscore: Option<String>,
    pub accounttier: Option<String>,
    pub xboxonerep: Option<String>,
    pub preferredcolor: Option<String>,
    pub realname: Option<String>,
    pub bio: Option<String>,
    pub tenurelevel: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XboxScraperData {
    pub background_picture_url: Option<String>,
    pub gamerscore: Option<u64>,
    pub games_played: Option<u64>,
    #[serde(default)]
    pub game_history: Vec<XboxGameHistory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XboxMeta {
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<XboxProfileDetails>,
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub cached_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraper_data: Option<XboxScraperData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XboxProfileData {
    pub username: Option<String>,
    pub id: Option<String>,
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<XboxMeta>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscordUserData {
    pub id: Option<String>,
    pub username: Option<String>,
    pub global_name: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
    pub creation_date: Option<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscordUsernameHistoryEntry {
    #[serde(default)]
    pub name: Vec<String>,
    #[serde(default)]
    pub time: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscordUsernameHistoryData {
    #[serde(default)]
    pub history: Vec<DiscordUsernameHistoryEntry>,
    pub lookups_left: Option<u64>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordToRobloxData {
    #[serde(rename = "roblox_id")]
    pub roblox_id: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub created: Option<String>,
    pub description: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    pub group_count: Option<u64>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RobloxUserData {
    pub username: Option<String>,
    #[serde(rename = "Current Username")]
    pub current_username: Option<String>,
    #[serde(rename = "Old Usernames")]
    pub old_usernames: Option<String>,
    #[serde(rename = "Display Name")]
    pub display_name: Option<String>,
    pub user_id: Option<String>,
    #[serde(rename = "User ID")]
    pub user_id_label: Option<String>,
    #[serde(rename = "Discord")]
    pub discord: Option<String>,
    #[serde(rename = "Join Date")]
    pub join_date: Option<String>,
    #[serde(rename = "Avatar URL")]
    pub avatar_url: Option<String>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoleheData {
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GhuntProfile {
    pub name: Option<String>,
    pub profile_picture: Option<String>,
    pub cover_picture: Option<String>,
    pub last_edit: Option<String>,
    pub maps_id: Option<String>,
    pub calendar_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GhuntData {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<GhuntProfile>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractSubdomainData {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub subdomains: Vec<String>,
    #[serde(default)]
    pub count: u64,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinecraftHistoryEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinecraftHistoryData {
    pub uuid: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub history: Vec<MinecraftHistoryEntry>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub response_meta: Option<ResponseMeta>,
}

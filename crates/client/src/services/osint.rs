//! Single-identifier OSINT lookups.

use std::sync::Arc;

use crate::client::transport::Transport;
use crate::endpoints::QueryParams;
use crate::error::{ClientError, Result};
use crate::models::{
    DiscordToRobloxData, DiscordUserData, DiscordUsernameHistoryData, Envelope,
    ExtractSubdomainData, GhuntData, HoleheData, IpInfoData, MinecraftHistoryData,
    RobloxUserData, SteamProfileData, XboxProfileData,
};

/// Identifies a Roblox account by id, username, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobloxLookup {
    pub user_id: Option<String>,
    pub username: Option<String>,
}

impl RobloxLookup {
    pub fn by_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            username: None,
        }
    }

    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            user_id: None,
            username: Some(username.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsintService {
    transport: Arc<Transport>,
}

impl OsintService {
    pub(crate) fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    async fn lookup<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        value: &str,
    ) -> Result<Envelope<T>> {
        let mut params = QueryParams::new();
        params.push(key, value);
        self.transport.get_envelope(path, &params).await
    }

    /// Geolocation and network details of an IP address.
    pub async fn ip_info(&self, ip: &str) -> Result<Envelope<IpInfoData>> {
        self.lookup("/service/ip-info", "ip", ip).await
    }

    pub async fn steam(&self, steam_id: &str) -> Result<Envelope<SteamProfileData>> {
        self.lookup("/service/steam", "steam_id", steam_id).await
    }

    pub async fn xbox(&self, xbl_id: &str) -> Result<Envelope<XboxProfileData>> {
        self.lookup("/service/xbox", "xbl_id", xbl_id).await
    }

    pub async fn discord_userinfo(&self, discord_id: &str) -> Result<Envelope<DiscordUserData>> {
        self.lookup("/service/discord-userinfo", "discord_id", discord_id)
            .await
    }

    pub async fn discord_username_history(
        &self,
        discord_id: &str,
    ) -> Result<Envelope<DiscordUsernameHistoryData>> {
        self.lookup("/service/discord-username-history", "discord_id", discord_id)
            .await
    }

    /// Roblox account linked to a Discord id.
    pub async fn discord_to_roblox(
        &self,
        discord_id: &str,
    ) -> Result<Envelope<DiscordToRobloxData>> {
        self.lookup("/service/discord-to-roblox", "discord_id", discord_id)
            .await
    }

    /// Roblox profile by user id and/or username.
    ///
    /// Fails with `InvalidArgument` before sending anything if neither is given.
    pub async fn roblox_userinfo(&self, lookup: &RobloxLookup) -> Result<Envelope<RobloxUserData>> {
        let user_id = lookup.user_id.as_deref().filter(|s| !s.is_empty());
        let username = lookup.username.as_deref().filter(|s| !s.is_empty());
        if user_id.is_none() && username.is_none() {
            return Err(ClientError::InvalidArgument(
                "either user_id or username is required".to_string(),
            ));
        }

        let mut params = QueryParams::new();
        params
            .push_opt("user_id", user_id)
            .push_opt("username", username);
        self.transport
            .get_envelope("/service/roblox-userinfo", &params)
            .await
    }

    /// Sites where `email` is registered.
    pub async fn holehe(&self, email: &str) -> Result<Envelope<HoleheData>> {
        self.lookup("/service/holehe", "email", email).await
    }

    /// Google account details for `email`.
    pub async fn ghunt(&self, email: &str) -> Result<Envelope<GhuntData>> {
        self.lookup("/service/ghunt", "email", email).await
    }

    /// Enumerate subdomains of `domain`, optionally only live ones.
    pub async fn extract_subdomain(
        &self,
        domain: &str,
        is_alive: Option<bool>,
    ) -> Result<Envelope<ExtractSubdomainData>> {
        let mut params = QueryParams::new();
        params.push("domain", domain).push_opt("is_alive", is_alive);
        self.transport
            .get_envelope("/service/extract-subdomain", &params)
            .await
    }

    pub async fn minecraft_history(
        &self,
        username: &str,
    ) -> Result<Envelope<MinecraftHistoryData>> {
        self.lookup("/service/minecraft-history", "username", username)
            .await
    }
}

//! Single-identifier OSINT lookups.

use anyhow::Result;
use clap::Subcommand;
use oathnet_client::models::{
    DiscordUsernameHistoryData, ExtractSubdomainData, HoleheData, MinecraftHistoryData,
};
use oathnet_client::{Envelope, RobloxLookup};
use serde::Serialize;

use super::{CommandContext, no_data_report};
use crate::formatters::Report;

const IP_PRIORITY: &[&str] = &[
    "query",
    "country",
    "countryCode",
    "regionName",
    "city",
    "isp",
    "org",
    "mobile",
    "proxy",
    "hosting",
];
const PROFILE_PRIORITY: &[&str] = &["id", "username", "avatar"];
const DISCORD_USER_PRIORITY: &[&str] =
    &["id", "username", "global_name", "creation_date", "badges"];
const DISCORD_ROBLOX_PRIORITY: &[&str] =
    &["roblox_id", "name", "displayName", "created", "description"];
const ROBLOX_PRIORITY: &[&str] = &[
    "User ID",
    "user_id",
    "username",
    "Current Username",
    "Display Name",
    "Old Usernames",
    "Join Date",
    "Discord",
];
const GHUNT_PRIORITY: &[&str] = &["email", "found", "profile"];

#[derive(Subcommand)]
pub enum OsintCommand {
    /// Geolocation and network info for an IP address
    Ip { ip: String },
    /// Steam profile
    Steam { steam_id: String },
    /// Xbox Live profile
    Xbox { gamertag: String },
    /// Discord lookups
    Discord {
        #[command(subcommand)]
        command: DiscordCommand,
    },
    /// Roblox user by id or username
    Roblox {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        username: Option<String>,
    },
    /// Services an email address is registered with
    Holehe { email: String },
    /// Google account info for an email address
    Ghunt { email: String },
    /// Subdomains of a domain
    Subdomain {
        domain: String,
        /// Only subdomains that currently resolve
        #[arg(long)]
        alive: bool,
    },
    /// Minecraft username history
    Minecraft { username: String },
}

#[derive(Subcommand)]
pub enum DiscordCommand {
    /// Discord user profile
    User { discord_id: String },
    /// Past usernames of a Discord user
    History { discord_id: String },
    /// Roblox account linked to a Discord user
    Roblox { discord_id: String },
}

pub(crate) async fn run(command: OsintCommand, ctx: &CommandContext<'_>) -> Result<()> {
    let osint = ctx.client.osint();
    let report = match command {
        OsintCommand::Ip { ip } => record_report(&ctx.call(osint.ip_info(&ip)).await?, IP_PRIORITY)?,
        OsintCommand::Steam { steam_id } => {
            record_report(&ctx.call(osint.steam(&steam_id)).await?, PROFILE_PRIORITY)?
        }
        OsintCommand::Xbox { gamertag } => {
            record_report(&ctx.call(osint.xbox(&gamertag)).await?, PROFILE_PRIORITY)?
        }
        OsintCommand::Discord { command } => match command {
            DiscordCommand::User { discord_id } => record_report(
                &ctx.call(osint.discord_userinfo(&discord_id)).await?,
                DISCORD_USER_PRIORITY,
            )?,
            DiscordCommand::History { discord_id } => {
                discord_history_report(&ctx.call(osint.discord_username_history(&discord_id)).await?)?
            }
            DiscordCommand::Roblox { discord_id } => record_report(
                &ctx.call(osint.discord_to_roblox(&discord_id)).await?,
                DISCORD_ROBLOX_PRIORITY,
            )?,
        },
        OsintCommand::Roblox { user_id, username } => {
            let lookup = RobloxLookup { user_id, username };
            record_report(&ctx.call(osint.roblox_userinfo(&lookup)).await?, ROBLOX_PRIORITY)?
        }
        OsintCommand::Holehe { email } => {
            holehe_report(&email, &ctx.call(osint.holehe(&email)).await?)?
        }
        OsintCommand::Ghunt { email } => {
            record_report(&ctx.call(osint.ghunt(&email)).await?, GHUNT_PRIORITY)?
        }
        OsintCommand::Subdomain { domain, alive } => subdomain_report(
            &ctx.call(osint.extract_subdomain(&domain, alive.then_some(true)))
                .await?,
        )?,
        OsintCommand::Minecraft { username } => {
            minecraft_report(&ctx.call(osint.minecraft_history(&username)).await?)?
        }
    };
    ctx.render(&report)
}

/// Show the payload as a single record.
fn record_report<T: Serialize>(envelope: &Envelope<T>, priority: &'static [&'static str]) -> Result<Report> {
    match envelope.data() {
        Some(data) => Report::new(envelope)?.record(priority, data),
        None => no_data_report(envelope, "No data found"),
    }
}

fn holehe_report(email: &str, envelope: &Envelope<HoleheData>) -> Result<Report> {
    let Some(data) = envelope.data() else {
        return no_data_report(envelope, "No data found");
    };
    let mut report = Report::new(envelope)?
        .summary("Email", email)
        .summary("Registered on", format!("{} services", data.domains.len()));
    for domain in &data.domains {
        report = report.footer(format!("  + {domain}"));
    }
    Ok(report)
}

fn subdomain_report(envelope: &Envelope<ExtractSubdomainData>) -> Result<Report> {
    let Some(data) = envelope.data() else {
        return no_data_report(envelope, "No subdomains found");
    };
    let mut report = Report::new(envelope)?
        .summary("Domain", &data.domain)
        .summary("Found", data.count);
    for subdomain in &data.subdomains {
        report = report.footer(format!("  {subdomain}"));
    }
    Ok(report)
}

fn discord_history_report(envelope: &Envelope<DiscordUsernameHistoryData>) -> Result<Report> {
    let Some(data) = envelope.data() else {
        return no_data_report(envelope, "No history found");
    };
    let mut report = Report::new(envelope)?.summary_opt("Lookups left", data.lookups_left);
    if data.history.is_empty() {
        return Ok(report.footer("No history found"));
    }
    for entry in &data.history {
        let names = entry.name.join(", ");
        let when = entry.time.first().map(String::as_str).unwrap_or("unknown");
        report = report.footer(format!("  {names} ({when})"));
    }
    Ok(report)
}

fn minecraft_report(envelope: &Envelope<MinecraftHistoryData>) -> Result<Report> {
    let Some(data) = envelope.data() else {
        return no_data_report(envelope, "No history found");
    };
    let mut report = Report::new(envelope)?
        .summary("Username", &data.username)
        .summary_opt("UUID", data.uuid.as_deref());
    for entry in &data.history {
        let when = entry.changed_at.as_deref().unwrap_or("original");
        report = report.footer(format!("  {} ({when})", entry.name));
    }
    Ok(report)
}

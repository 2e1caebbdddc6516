use std::env;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";
const DEFAULT_TRACKING_CHANNEL_ID: &str = "1127840971053350925";
const DEFAULT_GUILD_ID: &str = "1127840971053350922";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub http_timeout_secs: u64,
    pub discord: DiscordConfig,
    pub supabase: SupabaseConfig,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DiscordConfig {
    pub api_base: String,
    pub bot_token: Option<String>,
    /// Channel holding the pinned stats message.
    pub tracking_channel_id: String,
    pub stats_message_id: Option<String>,
    /// Channel relayed by the chat widget.
    pub chat_channel_id: Option<String>,
    pub guild_id: String,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub service_role_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| optional(&lookup, key);
        let get_or = |key: &str, default: &str| var_or(&lookup, key, default);

        Ok(Config {
            server_host: get_or("SERVER_HOST", "::"),
            server_port: parse_or(&lookup, "SERVER_PORT", 3000)?,
            api_base_uri: get_or("API_BASE_URI", "/api"),
            http_timeout_secs: parse_or(&lookup, "HTTP_TIMEOUT_SECS", 10)?,
            discord: DiscordConfig {
                api_base: get_or("DISCORD_API_BASE", DEFAULT_DISCORD_API_BASE),
                bot_token: get("DISCORD_BOT_TOKEN"),
                tracking_channel_id: get_or(
                    "DISCORD_TRACKING_CHANNEL_ID",
                    DEFAULT_TRACKING_CHANNEL_ID,
                ),
                stats_message_id: get("DISCORD_STATS_MESSAGE_ID"),
                chat_channel_id: get("DISCORD_CHANNEL_ID"),
                guild_id: get_or("DISCORD_GUILD_ID", DEFAULT_GUILD_ID),
            },
            supabase: SupabaseConfig {
                url: get("SUPABASE_URL"),
                anon_key: get("SUPABASE_ANON_KEY"),
                service_role_key: get("SUPABASE_SERVICE_ROLE_KEY"),
            },
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_DISCORD_API_BASE.to_string(),
            bot_token: None,
            tracking_channel_id: DEFAULT_TRACKING_CHANNEL_ID.to_string(),
            stats_message_id: None,
            chat_channel_id: None,
            guild_id: DEFAULT_GUILD_ID.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "::".to_string(),
            server_port: 3000,
            api_base_uri: "/api".to_string(),
            http_timeout_secs: 10,
            discord: DiscordConfig::default(),
            supabase: SupabaseConfig::default(),
        }
    }
}

// 空字符串视为未设置
fn optional<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn var_or<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: &str) -> String {
    optional(lookup, key).unwrap_or_else(|| {
        tracing::debug!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match optional(lookup, key) {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

use std::sync::Arc;

use chrono::Utc;
use config::Config;
use discord::DiscordClient;
use stats::{DiscordCounterStore, VisitTracker};
use supabase::SupabaseClient;

pub mod config;
pub mod discord;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod stats;
pub mod supabase;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub discord: DiscordClient,
    pub supabase: SupabaseClient,
    pub tracker: Arc<VisitTracker>,
}

impl AppState {
    /// Wires the Discord-backed counter store and a fresh seen-visitor set.
    pub fn new(config: Config) -> Self {
        let discord = DiscordClient::new(
            &config.discord.api_base,
            config.discord.bot_token.clone(),
            config.http_timeout(),
        );
        let store = Arc::new(DiscordCounterStore::new(discord.clone(), &config.discord));
        let supabase = SupabaseClient::new(&config.supabase, config.http_timeout());

        Self {
            tracker: Arc::new(VisitTracker::new(store, Utc::now())),
            discord,
            supabase,
            config,
        }
    }
}

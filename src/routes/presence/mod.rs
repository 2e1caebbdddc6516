use axum::extract::{Json, State};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct OnlineCount {
    pub online: u64,
}

/// Guild presence count. Never fails: falls back to the public widget and
/// finally to zero.
#[axum::debug_handler]
pub async fn get_online_count(State(state): State<AppState>) -> Json<OnlineCount> {
    let guild_id = &state.config.discord.guild_id;

    let online = match state.discord.guild_preview(guild_id).await {
        Ok(preview) => preview.approximate_presence_count.unwrap_or(0),
        Err(e) => {
            tracing::debug!("Guild preview unavailable, trying widget: {}", e);
            match state.discord.guild_widget(guild_id).await {
                Ok(widget) => widget.presence_count.unwrap_or(0),
                Err(e) => {
                    tracing::warn!("Failed to read guild presence: {}", e);
                    0
                }
            }
        }
    };

    Json(OnlineCount { online })
}

use axum::{
    extract::{Json, State},
    http::HeaderMap,
};
use chrono::Utc;

use super::model::{InitStatsResponse, TrackVisitResponse};
use crate::{
    AppState,
    error::AppError,
    stats::{VisitNotice, initial_message},
};

#[axum::debug_handler]
pub async fn track_visit(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<TrackVisitResponse> {
    let visit = VisitNotice::from_headers(&headers);
    let outcome = state.tracker.track(&visit, Utc::now()).await;
    Json(outcome.into())
}

/// Posts and pins a fresh stats message in the tracking channel.
#[axum::debug_handler]
pub async fn init_stats(State(state): State<AppState>) -> Result<Json<InitStatsResponse>, AppError> {
    if !state.discord.has_token() {
        return Err(AppError::NotConfigured("Bot token not configured".into()));
    }

    let channel_id = &state.config.discord.tracking_channel_id;
    let message = state
        .discord
        .create_message(channel_id, &initial_message(Utc::now()))
        .await
        .map_err(|e| {
            tracing::error!("Init stats error: {}", e);
            AppError::Upstream(format!("Failed to initialize stats: {e}"))
        })?;

    if let Err(e) = state.discord.pin_message(channel_id, &message.id).await {
        tracing::warn!("Failed to pin stats message {}: {}", message.id, e);
    }

    tracing::info!("Created stats message {}", message.id);
    Ok(Json(InitStatsResponse::created(message.id)))
}

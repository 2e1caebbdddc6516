use axum::{
    extract::{
        Json, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::header,
    response::IntoResponse,
};

use super::model::{
    FETCH_LIMIT, GetMessagesQuery, SendMessageRequest, SendMessageResponse, chat_feed,
};
use crate::{AppState, error::AppError};

fn chat_channel(state: &AppState) -> Result<&str, AppError> {
    match state.config.discord.chat_channel_id.as_deref() {
        Some(channel) if state.discord.has_token() => Ok(channel),
        _ => Err(AppError::NotConfigured("Bot not configured".into())),
    }
}

#[axum::debug_handler]
pub async fn get_messages(
    State(state): State<AppState>,
    query: Result<Query<GetMessagesQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let channel_id = chat_channel(&state)?;

    let messages = state
        .discord
        .list_messages(channel_id, FETCH_LIMIT)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch chat messages: {}", e);
            AppError::Upstream("Failed to fetch messages".into())
        })?;

    Ok((
        [(header::CACHE_CONTROL, "no-cache")],
        Json(chat_feed(messages, query.after)),
    ))
}

#[axum::debug_handler]
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let channel_id = chat_channel(&state)?;
    let content = req
        .content()
        .map_err(|msg| AppError::BadRequest(msg.into()))?;

    let message = state
        .discord
        .create_message(channel_id, &content)
        .await
        .map_err(|e| {
            tracing::error!("Failed to send chat message: {}", e);
            AppError::Upstream("Failed to send message".into())
        })?;

    Ok(Json(SendMessageResponse {
        success: true,
        id: message.id,
    }))
}

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;

use crate::{
    AppState,
    middleware::{cors_layer, log_errors},
    routes,
};

// 访问统计
pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/track-visit", post(routes::stats::track_visit))
        .route(
            "/init-stats",
            get(routes::stats::init_stats).post(routes::stats::init_stats),
        )
}

// 聊天窗口
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/get-messages", get(routes::chat::get_messages))
        .route("/send-message", post(routes::chat::send_message))
        .route("/get-online-count", get(routes::presence::get_online_count))
}

pub fn account_routes() -> Router<AppState> {
    Router::new().route(
        "/delete-account",
        delete(routes::account::delete_account).post(routes::account::delete_account),
    )
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(stats_routes())
        .merge(chat_routes())
        .merge(account_routes());

    // axum 不允许在根路径 nest
    let base = state.config.api_base_uri.trim_end_matches('/').to_string();
    let router = if base.is_empty() {
        api
    } else {
        Router::new().nest(&base, api)
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(log_errors))
                .layer(cors_layer()),
        )
        .with_state(state)
}

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use backend::{
    AppState,
    config::{Config, DiscordConfig, SupabaseConfig},
    router::create_router,
};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TRACKING_CHANNEL: &str = "100";
pub const CHAT_CHANNEL: &str = "200";
pub const STATS_MESSAGE: &str = "555";
pub const GUILD: &str = "42";

/// Recorded state of the fake Discord API.
#[derive(Default)]
pub struct FakeDiscord {
    pub stats_content: Mutex<Option<String>>,
    pub patches: Mutex<Vec<String>>,
    pub created: Mutex<Vec<(String, String)>>,
    pub allowed_mentions: Mutex<Vec<Value>>,
    pub pinned: Mutex<Vec<String>>,
    pub chat: Mutex<Vec<Value>>,
    pub fail_patch: Mutex<bool>,
    pub preview_presence: Mutex<Option<u64>>,
    pub widget_presence: Mutex<Option<u64>>,
}

type Shared = Arc<FakeDiscord>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .is_some_and(|h| h == "Bot test-token")
}

fn message_json(id: &str, content: &str) -> Value {
    json!({
        "id": id,
        "content": content,
        "author": { "username": "dacc-bot", "bot": true },
        "timestamp": "2024-01-15T20:00:00.000000+00:00",
        "edited_timestamp": null
    })
}

async fn get_message(
    State(fake): State<Shared>,
    headers: HeaderMap,
    Path((_channel, id)): Path<(String, String)>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match (id.as_str(), fake.stats_content.lock().unwrap().clone()) {
        (STATS_MESSAGE, Some(content)) => Json(message_json(&id, &content)).into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"message": "Unknown Message"}))).into_response(),
    }
}

async fn patch_message(
    State(fake): State<Shared>,
    Path((_channel, _id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    if *fake.fail_patch.lock().unwrap() {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let content = body["content"].as_str().unwrap_or_default().to_string();
    fake.patches.lock().unwrap().push(content.clone());
    *fake.stats_content.lock().unwrap() = Some(content);
    StatusCode::OK.into_response()
}

async fn create_message(
    State(fake): State<Shared>,
    Path(channel): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let content = body["content"].as_str().unwrap_or_default().to_string();
    fake.created.lock().unwrap().push((channel, content.clone()));
    fake.allowed_mentions
        .lock()
        .unwrap()
        .push(body["allowed_mentions"].clone());
    Json(message_json("999", &content))
}

async fn list_messages(State(fake): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(fake.chat.lock().unwrap().clone()).into_response()
}

async fn pin(State(fake): State<Shared>, Path((_channel, id)): Path<(String, String)>) -> StatusCode {
    fake.pinned.lock().unwrap().push(id);
    StatusCode::NO_CONTENT
}

async fn preview(State(fake): State<Shared>) -> Response {
    match *fake.preview_presence.lock().unwrap() {
        Some(n) => Json(json!({ "approximate_presence_count": n })).into_response(),
        None => StatusCode::FORBIDDEN.into_response(),
    }
}

async fn widget(State(fake): State<Shared>) -> Response {
    match *fake.widget_presence.lock().unwrap() {
        Some(n) => Json(json!({ "presence_count": n })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn discord_router(fake: Shared) -> Router {
    Router::new()
        .route(
            "/channels/{channel}/messages/{id}",
            get(get_message).patch(patch_message),
        )
        .route(
            "/channels/{channel}/messages",
            get(list_messages).post(create_message),
        )
        .route("/channels/{channel}/pins/{id}", put(pin))
        .route("/guilds/{id}/preview", get(preview))
        .route("/guilds/{id}/widget.json", get(widget))
        .with_state(fake)
}

/// Recorded state of the fake Supabase API.
#[derive(Default)]
pub struct FakeSupabase {
    pub files: Mutex<Vec<String>>,
    pub removed: Mutex<Vec<String>>,
    pub deleted_profiles: Mutex<Vec<String>>,
    pub deleted_users: Mutex<Vec<String>>,
    pub fail_profile_delete: Mutex<bool>,
}

type SharedSupabase = Arc<FakeSupabase>;

async fn auth_user(headers: HeaderMap) -> Response {
    let token = headers.get("authorization").and_then(|h| h.to_str().ok());
    let apikey = headers.get("apikey").and_then(|h| h.to_str().ok());
    if token == Some("Bearer member-jwt") && apikey == Some("anon") {
        Json(json!({ "id": "user-1", "email": "member@example.edu" })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"msg": "invalid JWT"}))).into_response()
    }
}

async fn list_objects(State(fake): State<SharedSupabase>, Json(body): Json<Value>) -> Json<Value> {
    assert_eq!(body["prefix"], "user-1");
    let files: Vec<Value> = fake
        .files
        .lock()
        .unwrap()
        .iter()
        .map(|name| json!({ "name": name }))
        .collect();
    Json(Value::Array(files))
}

async fn remove_objects(State(fake): State<SharedSupabase>, Json(body): Json<Value>) -> StatusCode {
    let prefixes = body["prefixes"].as_array().cloned().unwrap_or_default();
    fake.removed
        .lock()
        .unwrap()
        .extend(prefixes.iter().filter_map(|p| p.as_str().map(str::to_string)));
    StatusCode::OK
}

async fn delete_profile(State(fake): State<SharedSupabase>, req: Request<Body>) -> StatusCode {
    if *fake.fail_profile_delete.lock().unwrap() {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let query = req.uri().query().unwrap_or_default().to_string();
    fake.deleted_profiles.lock().unwrap().push(query);
    StatusCode::NO_CONTENT
}

async fn delete_auth_user(
    State(fake): State<SharedSupabase>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> StatusCode {
    if headers.get("authorization").and_then(|h| h.to_str().ok()) != Some("Bearer service") {
        return StatusCode::FORBIDDEN;
    }
    fake.deleted_users.lock().unwrap().push(id);
    StatusCode::OK
}

pub fn supabase_router(fake: SharedSupabase) -> Router {
    Router::new()
        .route("/auth/v1/user", get(auth_user))
        .route("/storage/v1/object/list/profile-pictures", post(list_objects))
        .route("/storage/v1/object/profile-pictures", delete(remove_objects))
        .route("/rest/v1/users", delete(delete_profile))
        .route("/auth/v1/admin/users/{id}", delete(delete_auth_user))
        .with_state(fake)
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn config(discord_base: &str, supabase_base: Option<&str>) -> Config {
    Config {
        discord: DiscordConfig {
            api_base: discord_base.to_string(),
            bot_token: Some("test-token".into()),
            tracking_channel_id: TRACKING_CHANNEL.into(),
            stats_message_id: Some(STATS_MESSAGE.into()),
            chat_channel_id: Some(CHAT_CHANNEL.into()),
            guild_id: GUILD.into(),
        },
        supabase: SupabaseConfig {
            url: supabase_base.map(str::to_string),
            anon_key: Some("anon".into()),
            service_role_key: Some("service".into()),
        },
        ..Config::default()
    }
}

pub fn app(config: Config) -> Router {
    create_router(AppState::new(config))
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

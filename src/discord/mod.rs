//! Thin client over the handful of Discord REST endpoints the site uses.

mod model;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use thiserror::Error;

pub use model::{Author, GuildPreview, GuildWidget, Message};
use model::MessageBody;

#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("bot token not configured")]
    MissingToken,
    #[error("discord returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("discord request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl DiscordError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DiscordError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

#[derive(Clone)]
pub struct DiscordClient {
    http: Client,
    api_base: String,
    bot_token: Option<String>,
}

impl DiscordClient {
    pub fn new(api_base: &str, bot_token: Option<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                Client::new()
            });
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            bot_token,
        }
    }

    pub fn has_token(&self) -> bool {
        self.bot_token.is_some()
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, DiscordError> {
        let token = self.bot_token.as_deref().ok_or(DiscordError::MissingToken)?;
        Ok(builder.header(reqwest::header::AUTHORIZATION, format!("Bot {token}")))
    }

    pub async fn get_message(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Message, DiscordError> {
        let url = format!(
            "{}/channels/{}/messages/{}",
            self.api_base, channel_id, message_id
        );
        let resp = self.authorized(self.http.get(url))?.send().await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        content: &str,
    ) -> Result<(), DiscordError> {
        let url = format!(
            "{}/channels/{}/messages/{}",
            self.api_base, channel_id, message_id
        );
        let resp = self
            .authorized(self.http.patch(url))?
            .json(&MessageBody::new(content))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn create_message(
        &self,
        channel_id: &str,
        content: &str,
    ) -> Result<Message, DiscordError> {
        let url = format!("{}/channels/{}/messages", self.api_base, channel_id);
        let resp = self
            .authorized(self.http.post(url))?
            .json(&MessageBody::new(content))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn pin_message(&self, channel_id: &str, message_id: &str) -> Result<(), DiscordError> {
        let url = format!(
            "{}/channels/{}/pins/{}",
            self.api_base, channel_id, message_id
        );
        let resp = self.authorized(self.http.put(url))?.send().await?;
        check(resp).await?;
        Ok(())
    }

    /// Most recent messages first, as Discord returns them.
    pub async fn list_messages(
        &self,
        channel_id: &str,
        limit: u8,
    ) -> Result<Vec<Message>, DiscordError> {
        let url = format!("{}/channels/{}/messages", self.api_base, channel_id);
        let resp = self
            .authorized(self.http.get(url))?
            .query(&[("limit", limit)])
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn guild_preview(&self, guild_id: &str) -> Result<GuildPreview, DiscordError> {
        let url = format!("{}/guilds/{}/preview", self.api_base, guild_id);
        let resp = self.authorized(self.http.get(url))?.send().await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Public widget endpoint, no credential needed.
    pub async fn guild_widget(&self, guild_id: &str) -> Result<GuildWidget, DiscordError> {
        let url = format!("{}/guilds/{}/widget.json", self.api_base, guild_id);
        let resp = self.http.get(url).send().await?;
        Ok(check(resp).await?.json().await?)
    }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, DiscordError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(DiscordError::Status { status, body })
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::discord::Message;

/// Discord caps message content at this many characters.
pub const MAX_CONTENT_CHARS: usize = 2000;
pub const FETCH_LIMIT: u8 = 50;

#[derive(Debug, Deserialize)]
pub struct GetMessagesQuery {
    /// Epoch milliseconds; only messages strictly newer are returned.
    pub after: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub author: String,
    pub is_bot: bool,
    pub is_webhook: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<Message> for ChatMessage {
    fn from(msg: Message) -> Self {
        Self {
            id: msg.id,
            content: msg.content,
            author: msg.author.username,
            is_bot: msg.author.bot,
            is_webhook: msg.webhook_id.is_some(),
            timestamp: msg.timestamp,
        }
    }
}

/// Newest-first Discord listing → oldest-first widget feed.
pub fn chat_feed(messages: Vec<Message>, after: Option<i64>) -> Vec<ChatMessage> {
    let mut feed: Vec<ChatMessage> = messages
        .into_iter()
        .filter(|m| after.is_none_or(|after| m.timestamp.timestamp_millis() > after))
        .map(ChatMessage::from)
        .collect();
    feed.reverse();
    feed
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub username: String,
    pub message: String,
}

impl SendMessageRequest {
    /// Validated Discord content for this chat line.
    pub fn content(&self) -> Result<String, &'static str> {
        let username = self.username.trim();
        let message = self.message.trim();
        if username.is_empty() || message.is_empty() {
            return Err("Username and message are required");
        }
        let content = format!("**{username}:** {message}");
        if content.chars().count() > MAX_CONTENT_CHARS {
            return Err("Message too long");
        }
        Ok(content)
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub id: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub content: String,
    pub author: Author,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub webhook_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub username: String,
    #[serde(default)]
    pub bot: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct MessageBody<'a> {
    pub content: &'a str,
    pub allowed_mentions: AllowedMentions,
}

/// Mention types Discord may resolve in a message; empty means none ping.
#[derive(Debug, Default, Serialize)]
pub(crate) struct AllowedMentions {
    pub parse: Vec<&'static str>,
}

impl<'a> MessageBody<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            allowed_mentions: AllowedMentions::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GuildPreview {
    #[serde(default)]
    pub approximate_presence_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct GuildWidget {
    #[serde(default)]
    pub presence_count: Option<u64>,
}

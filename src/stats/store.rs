use async_trait::async_trait;
use thiserror::Error;

use crate::config::DiscordConfig;
use crate::discord::{DiscordClient, DiscordError};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Credential or message id missing; tracking is switched off.
    #[error("counter store not configured")]
    NotConfigured,
    #[error("counter message not found")]
    NotFound,
    #[error("counter store transport error: {0}")]
    Transport(String),
}

impl From<DiscordError> for StoreError {
    fn from(e: DiscordError) -> Self {
        match e {
            DiscordError::MissingToken => StoreError::NotConfigured,
            e if e.is_not_found() => StoreError::NotFound,
            e => StoreError::Transport(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCounter {
    pub content: String,
    /// Opaque marker of the revision that was read. Writes do not check it.
    pub version: String,
}

/// Single text blob holding the encoded counters.
///
/// There is no conditional write: two writers that read the same revision
/// both succeed and the later one wins.
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn read(&self) -> Result<StoredCounter, StoreError>;
    async fn write(&self, content: &str) -> Result<(), StoreError>;
}

/// Counters kept in the body of a pinned Discord message.
pub struct DiscordCounterStore {
    client: DiscordClient,
    channel_id: String,
    message_id: Option<String>,
}

impl DiscordCounterStore {
    pub fn new(client: DiscordClient, config: &DiscordConfig) -> Self {
        Self {
            client,
            channel_id: config.tracking_channel_id.clone(),
            message_id: config.stats_message_id.clone(),
        }
    }

    fn message_id(&self) -> Result<&str, StoreError> {
        if !self.client.has_token() {
            return Err(StoreError::NotConfigured);
        }
        self.message_id.as_deref().ok_or(StoreError::NotConfigured)
    }
}

#[async_trait]
impl CounterStore for DiscordCounterStore {
    async fn read(&self) -> Result<StoredCounter, StoreError> {
        let message_id = self.message_id()?;
        let message = self.client.get_message(&self.channel_id, message_id).await?;
        let version = message
            .edited_timestamp
            .unwrap_or(message.timestamp)
            .to_rfc3339();
        Ok(StoredCounter {
            content: message.content,
            version,
        })
    }

    async fn write(&self, content: &str) -> Result<(), StoreError> {
        let message_id = self.message_id()?;
        self.client
            .edit_message(&self.channel_id, message_id, content)
            .await?;
        Ok(())
    }
}

//! Channel trait — the abstraction over the chat surface.
//!
//! A Channel receives lines from the learner and shows the coach's replies.
//! The terminal is the only surface shipped today.

use crate::error::ChannelError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Unique identifier for a channel instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message received from a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// The channel this message belongs to
    pub channel_id: ChannelId,

    /// Sender identifier
    pub sender_id: String,

    /// The text content
    pub content: String,

    /// The chat/session identifier within the channel
    pub chat_id: String,
}

/// The core Channel trait.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name (e.g., "cli").
    fn name(&self) -> &str;

    /// Unique ID for this channel instance.
    fn id(&self) -> &ChannelId;

    /// Start listening for incoming messages.
    ///
    /// Returns a receiver that yields incoming messages until the learner
    /// leaves or the input closes.
    async fn start(
        &self,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<ChannelMessage, ChannelError>>,
        ChannelError,
    >;

    /// Send a reply to a specific chat.
    async fn send(&self, chat_id: &str, content: &str) -> std::result::Result<(), ChannelError>;
}

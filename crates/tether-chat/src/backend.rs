//! Abstraction over the hosted chat backend.
//!
//! The backend is authoritative for channel membership, message storage and
//! unread counts; this service only ever reads the projected state. The
//! trait exists so the HTTP client can be swapped for an in-memory double
//! in tests (and so no component reaches for a global client instance).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Identity mirrored into the chat backend's user space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatUser {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMember {
    pub user_id: String,
    /// Resolved user record, absent when the backend no longer knows the
    /// member (deleted upstream).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ChatUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePreview {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Backend-reported state of one channel, as seen by the querying user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelState {
    pub id: String,
    pub channel_type: String,
    pub created_by_id: String,
    pub members: Vec<ChatMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<MessagePreview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<DateTime<Utc>>,
    /// Unread count for the user on whose behalf the query ran.
    #[serde(default)]
    pub unread_count: u32,
}

/// Channel type used for all direct-message channels.
pub const MESSAGING: &str = "messaging";

#[async_trait]
pub trait ChatBackend: Send + Sync + 'static {
    /// Fetch a messaging channel by id. `ChatError::NotFound` when absent.
    async fn get_channel(&self, channel_id: &str) -> Result<ChannelState, ChatError>;

    /// Create a messaging channel with the given member set.
    /// `ChatError::Conflict` when a concurrent creator already won.
    async fn create_channel(
        &self,
        channel_id: &str,
        members: &[String],
        created_by: &str,
    ) -> Result<ChannelState, ChatError>;

    /// All messaging channels `member_id` belongs to, most recent message
    /// first, bounded to `limit`.
    async fn query_channels(
        &self,
        member_id: &str,
        limit: u32,
    ) -> Result<Vec<ChannelState>, ChatError>;

    /// Create-or-update the user's display identity on the backend.
    async fn upsert_user(&self, user: &ChatUser) -> Result<(), ChatError>;
}

/// Live-session half of the backend SDK, kept separate from [`ChatBackend`]
/// so the session bridge can be tested against a counting double.
#[async_trait]
pub trait ChatConnector: Send + Sync + 'static {
    async fn connect(&self, user: &ChatUser, token: &str) -> Result<(), ChatError>;
    async fn disconnect(&self, user_id: &str) -> Result<(), ChatError>;
}

//! Conversation-list projection.
//!
//! Maps the backend's channel state to display-ready records. The projection
//! is ephemeral: recomputed on every listing, never stored.

use tracing::debug;

use tether_types::api::{ConversationRecord, UserSummary};

use crate::backend::ChatBackend;
use crate::error::ChatError;

/// Matches the page size the conversation view requests.
pub const CONVERSATION_PAGE_SIZE: u32 = 50;

/// Project all 1:1 conversations of `user_id`, most recent message first.
///
/// Group channels are skipped, and so is any channel whose counterpart can
/// no longer be resolved — a conversation is never rendered against a
/// placeholder identity. Ordering is taken as returned by the backend.
pub async fn list_conversations<B: ChatBackend + ?Sized>(
    backend: &B,
    user_id: &str,
) -> Result<Vec<ConversationRecord>, ChatError> {
    let channels = backend
        .query_channels(user_id, CONVERSATION_PAGE_SIZE)
        .await?;

    let mut records = Vec::with_capacity(channels.len());
    for channel in channels {
        if channel.members.len() != 2 {
            debug!(
                channel = %channel.id,
                members = channel.members.len(),
                "skipping non-1:1 channel"
            );
            continue;
        }

        let Some(counterpart) = channel.members.iter().find(|m| m.user_id != user_id) else {
            debug!(channel = %channel.id, "no counterpart member, dropping");
            continue;
        };
        let Some(user) = counterpart.user.as_ref() else {
            debug!(
                channel = %channel.id,
                counterpart = %counterpart.user_id,
                "counterpart unresolved, dropping"
            );
            continue;
        };

        let timestamp = channel
            .last_message
            .as_ref()
            .map(|m| m.created_at)
            .or(channel.last_message_at);

        records.push(ConversationRecord {
            id: channel.id.clone(),
            user: UserSummary {
                id: user.id.clone(),
                username: user.name.clone().unwrap_or_else(|| user.id.clone()),
                nickname: user.name.clone(),
                image: user.image.clone(),
            },
            last_message: channel.last_message.as_ref().map(|m| m.text.clone()),
            timestamp,
            unread: channel.unread_count > 0,
        });
    }

    Ok(records)
}

//! Idempotent create-or-fetch of direct-message channels.

use tracing::debug;

use crate::backend::ChatBackend;
use crate::error::{ChatError, ResolveError};
use crate::key::canonical_key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub channel_id: String,
    /// True when the channel was already present on the backend.
    pub existed: bool,
}

/// Ensure the 1:1 channel between `requester_id` and `recipient_id` exists.
///
/// Fetch first; on miss, create; if the create loses a concurrent race
/// (backend reports a conflict on the canonical id) re-fetch exactly once.
/// Any other backend failure is surfaced unmapped and never retried.
pub async fn resolve_channel<B: ChatBackend + ?Sized>(
    backend: &B,
    requester_id: &str,
    recipient_id: &str,
) -> Result<Resolution, ResolveError> {
    let key = canonical_key(requester_id, recipient_id)?;

    match backend.get_channel(&key).await {
        Ok(_) => {
            return Ok(Resolution {
                channel_id: key,
                existed: true,
            });
        }
        Err(ChatError::NotFound) => {}
        Err(err) => return Err(ResolveError::Backend(err)),
    }

    let members = [requester_id.to_string(), recipient_id.to_string()];
    match backend.create_channel(&key, &members, requester_id).await {
        Ok(_) => Ok(Resolution {
            channel_id: key,
            existed: false,
        }),
        Err(ChatError::Conflict) => {
            // A concurrent creator won the race; the channel must be there now.
            debug!(channel = %key, "create conflicted, re-fetching");
            match backend.get_channel(&key).await {
                Ok(_) => Ok(Resolution {
                    channel_id: key,
                    existed: true,
                }),
                Err(ChatError::NotFound) => Err(ResolveError::ChannelUnavailable),
                Err(err) => Err(ResolveError::Backend(err)),
            }
        }
        Err(err) => Err(ResolveError::Backend(err)),
    }
}

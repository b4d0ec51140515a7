use axum::{Extension, Json, extract::State};

use tether_chat::{ChatBackend, resolve_channel};
use tether_types::api::{ChannelRequest, ChannelResponse, Claims};

use crate::{AppState, error::ApiError};

/// POST /channel — ensure the 1:1 channel with `recipient_id` exists.
///
/// All channel creation funnels through here; clients never create channels
/// against the chat backend directly, so there is exactly one id scheme.
pub async fn create_channel<B: ChatBackend>(
    State(state): State<AppState<B>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ChannelRequest>,
) -> Result<Json<ChannelResponse>, ApiError> {
    if req.recipient_id.is_empty() {
        return Err(ApiError::BadRequest("recipient_id is required".to_string()));
    }

    // The recipient must be a known user before we touch the chat backend.
    let db_state = state.clone();
    let recipient_id = req.recipient_id.clone();
    let exists =
        tokio::task::spawn_blocking(move || db_state.db.user_exists(&recipient_id)).await??;
    if !exists {
        return Err(ApiError::NotFound(format!(
            "recipient {} not found",
            req.recipient_id
        )));
    }

    let resolution = resolve_channel(&state.chat, &claims.sub, &req.recipient_id).await?;
    Ok(Json(ChannelResponse {
        channel_id: resolution.channel_id,
        existed: resolution.existed,
    }))
}

use axum::{Extension, Json, extract::State};

use tether_chat::{ChatBackend, list_conversations};
use tether_types::api::{Claims, ConversationsResponse};

use crate::{AppState, error::ApiError};

/// GET /conversations — the caller's 1:1 conversations, most recent first.
pub async fn list<B: ChatBackend>(
    State(state): State<AppState<B>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ConversationsResponse>, ApiError> {
    let conversations = list_conversations(&state.chat, &claims.sub).await?;
    let total = conversations.len();
    Ok(Json(ConversationsResponse {
        conversations,
        total,
    }))
}

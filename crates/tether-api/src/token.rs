use axum::{Extension, Json, extract::State};
use tracing::warn;

use tether_chat::{ChatBackend, backend::ChatUser};
use tether_types::api::{Claims, TokenRequest, TokenResponse};

use crate::{AppState, error::ApiError};

/// POST /token — mint a chat-backend credential for the caller.
///
/// The optional `user_id` body must match the authenticated caller; minting
/// for anyone else is forbidden. On success the caller's display identity is
/// mirrored into the chat backend so counterparts can render it — that
/// upsert is best-effort and never fails the token response.
pub async fn issue_token<B: ChatBackend>(
    State(state): State<AppState<B>>,
    Extension(claims): Extension<Claims>,
    body: Option<Json<TokenRequest>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let req = body.map(|Json(b)| b).unwrap_or_default();
    let token = state.tokens.issue(&claims.sub, req.user_id.as_deref())?;

    let chat_user = display_identity(&state, &claims).await;
    if let Err(err) = state.chat.upsert_user(&chat_user).await {
        warn!(user = %claims.sub, "display identity upsert failed: {err}");
    }

    Ok(Json(TokenResponse {
        token,
        api_key: state.tokens.api_key().to_string(),
    }))
}

/// Best identity we can offer the chat backend: directory profile when we
/// have one, otherwise whatever the auth token carried.
async fn display_identity<B: ChatBackend>(state: &AppState<B>, claims: &Claims) -> ChatUser {
    let db_state = state.clone();
    let user_id = claims.sub.clone();
    let profile = match tokio::task::spawn_blocking(move || db_state.db.get_user(&user_id)).await {
        Ok(Ok(row)) => row,
        Ok(Err(err)) => {
            warn!(user = %claims.sub, "profile lookup failed: {err}");
            None
        }
        Err(err) => {
            warn!("spawn_blocking join error: {err}");
            None
        }
    };

    match profile {
        Some(row) => ChatUser {
            id: claims.sub.clone(),
            name: row.nickname.or(Some(row.username)),
            image: row.image,
        },
        None => ChatUser {
            id: claims.sub.clone(),
            name: claims.name.clone(),
            image: None,
        },
    }
}

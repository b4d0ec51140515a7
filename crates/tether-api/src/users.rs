use axum::{
    Extension, Json,
    extract::{Path, State},
};
use tracing::warn;

use tether_chat::{ChatBackend, backend::ChatUser};
use tether_types::api::{Claims, UpdateProfileRequest, UserResponse};

use crate::{AppState, error::ApiError};

/// PUT /users/me — update the caller's directory profile and mirror it to
/// the chat backend (best-effort, like the token path).
pub async fn update_profile<B: ChatBackend>(
    State(state): State<AppState<B>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    if req.username.trim().is_empty() {
        return Err(ApiError::BadRequest("username is required".to_string()));
    }

    let db_state = state.clone();
    let user_id = claims.sub.clone();
    let username = req.username.clone();
    let nickname = req.nickname.clone();
    let image = req.image.clone();
    tokio::task::spawn_blocking(move || {
        db_state
            .db
            .upsert_user(&user_id, &username, nickname.as_deref(), image.as_deref())
    })
    .await??;

    let chat_user = ChatUser {
        id: claims.sub.clone(),
        name: req.nickname.clone().or_else(|| Some(req.username.clone())),
        image: req.image.clone(),
    };
    if let Err(err) = state.chat.upsert_user(&chat_user).await {
        warn!(user = %claims.sub, "display identity upsert failed: {err}");
    }

    Ok(Json(UserResponse {
        id: claims.sub,
        username: req.username,
        nickname: req.nickname,
        image: req.image,
    }))
}

/// GET /users/{user_id} — directory profile summary.
pub async fn get_profile<B: ChatBackend>(
    State(state): State<AppState<B>>,
    Extension(_claims): Extension<Claims>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let db_state = state.clone();
    let lookup_id = user_id.clone();
    let row = tokio::task::spawn_blocking(move || db_state.db.get_user(&lookup_id))
        .await??
        .ok_or_else(|| ApiError::NotFound(format!("user {user_id} not found")))?;

    Ok(Json(UserResponse {
        id: row.id,
        username: row.username,
        nickname: row.nickname,
        image: row.image,
    }))
}

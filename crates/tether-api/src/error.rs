//! Boundary error mapping.
//!
//! Internal components never let a raw backend error reach the caller:
//! everything is folded into this taxonomy and rendered as a JSON `{error}`
//! body with the matching status code.

use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use tracing::error;

use tether_chat::{ChatError, ResolveError, TokenError};
use tether_types::api::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized,
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                // Full detail goes to the log; the caller gets a retryable generic.
                error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "something went wrong, please try again".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::NotFound => ApiError::NotFound("not found".to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::SelfMessage => {
                ApiError::Forbidden("you cannot message yourself".to_string())
            }
            ResolveError::InvalidPairing(e) => ApiError::BadRequest(e.to_string()),
            ResolveError::ChannelUnavailable => ApiError::Internal(err.to_string()),
            ResolveError::Backend(e) => e.into(),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Forbidden => ApiError::Forbidden(err.to_string()),
            TokenError::Signing(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("spawn_blocking join error: {err}"))
    }
}

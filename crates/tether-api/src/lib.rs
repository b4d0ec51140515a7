pub mod channel;
pub mod conversations;
pub mod error;
pub mod middleware;
pub mod token;
pub mod users;

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};

use tether_chat::{ChatBackend, TokenIssuer};
use tether_db::Database;

/// Shared application state. The chat backend is injected, never a global;
/// tests run the same router against an in-memory double.
pub struct AppStateInner<B> {
    pub db: Database,
    pub chat: B,
    pub tokens: TokenIssuer,
    pub jwt_secret: String,
}

pub type AppState<B> = Arc<AppStateInner<B>>;

/// All routes require a valid bearer token from the auth provider.
pub fn router<B: ChatBackend>(state: AppState<B>) -> Router {
    Router::new()
        .route("/channel", post(channel::create_channel::<B>))
        .route("/token", post(token::issue_token::<B>))
        .route("/conversations", get(conversations::list::<B>))
        .route("/users/me", put(users::update_profile::<B>))
        .route("/users/{user_id}", get(users::get_profile::<B>))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth::<B>,
        ))
        .with_state(state)
}

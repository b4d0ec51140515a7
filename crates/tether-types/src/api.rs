use serde::{Deserialize, Serialize};

// -- JWT Claims --

/// Claims carried by the external auth provider's bearer tokens. Canonical
/// definition lives here in tether-types so the REST middleware and any
/// future gateway share one shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Stable opaque user identifier, owned by the auth provider.
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: usize,
}

// -- Channels --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelRequest {
    pub recipient_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelResponse {
    pub channel_id: String,
    /// True when the channel already existed on the chat backend.
    pub existed: bool,
}

// -- Tokens --

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenRequest {
    /// Optional explicit subject. Must match the authenticated caller.
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    /// Public API key the client needs to construct its own chat client.
    pub api_key: String,
}

// -- Conversations --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Display-ready projection of one 1:1 channel. Rebuilt on every listing,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: String,
    pub user: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
    pub unread: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationsResponse {
    pub conversations: Vec<ConversationRecord>,
    pub total: usize,
}

// -- User directory --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub username: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

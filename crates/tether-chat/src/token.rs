//! Chat-backend credential minting.
//!
//! Tokens bind a local user id into the backend's trust domain, signed with
//! the backend API secret. The backend validates them on connect; nothing
//! here is ever persisted.

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default credential lifetime.
const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("a user may only mint a chat credential for themselves")]
    Forbidden,
    #[error("failed to sign chat credential: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatTokenClaims {
    pub user_id: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct ServerTokenClaims {
    server: bool,
    exp: usize,
}

#[derive(Clone)]
pub struct TokenIssuer {
    api_key: String,
    api_secret: String,
}

impl TokenIssuer {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Public API key, returned alongside tokens so clients can construct
    /// their own backend client.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Mint a user credential. When `requested_id` is present it must match
    /// the authenticated caller; minting for anyone else is refused.
    pub fn issue(&self, caller_id: &str, requested_id: Option<&str>) -> Result<String, TokenError> {
        if let Some(requested) = requested_id {
            if requested != caller_id {
                return Err(TokenError::Forbidden);
            }
        }
        let now = chrono::Utc::now();
        let claims = ChatTokenClaims {
            user_id: caller_id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
        };
        Ok(self.sign(&claims)?)
    }

    /// Server-scoped credential used by the service's own backend client.
    pub fn server_token(&self) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = ServerTokenClaims {
            server: true,
            exp: (chrono::Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp()
                as usize,
        };
        self.sign(&claims)
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.api_secret.as_bytes()),
        )
    }
}

use thiserror::Error;

use crate::key::PairingError;

/// Failures talking to the hosted chat backend, classified by what the
/// caller can do about them.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("channel or user not found")]
    NotFound,
    #[error("channel already exists")]
    Conflict,
    #[error("chat backend rejected credentials: {0}")]
    Unauthorized(String),
    #[error("chat backend rate limit exceeded")]
    RateLimited,
    #[error("chat backend request timed out")]
    Timeout,
    #[error("chat backend error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("chat backend transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to sign backend credential: {0}")]
    Credential(#[from] jsonwebtoken::errors::Error),
}

/// Outcome classification for channel resolution. The HTTP status mapping
/// lives in tether-api.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("a user cannot message themselves")]
    SelfMessage,
    #[error("invalid participant: {0}")]
    InvalidPairing(PairingError),
    #[error("channel could not be created or fetched after create conflict")]
    ChannelUnavailable,
    #[error(transparent)]
    Backend(ChatError),
}

impl From<PairingError> for ResolveError {
    fn from(err: PairingError) -> Self {
        match err {
            PairingError::SamePeer => ResolveError::SelfMessage,
            other => ResolveError::InvalidPairing(other),
        }
    }
}

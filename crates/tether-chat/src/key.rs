//! Canonical conversation keys.
//!
//! A 1:1 channel is addressed by a key derived purely from its two
//! participants, so any two devices (or two racing browser tabs) that want
//! the same conversation compute the same channel id and the backend's
//! uniqueness constraint turns the create race into at-most-one-winner.

use thiserror::Error;

/// Namespace tag for direct-message channels. Keys look like `dm_<lo>_<hi>`
/// with the participant ids in lexicographic order.
pub const KEY_PREFIX: &str = "dm";

const DELIMITER: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    #[error("participant identifiers must be non-empty")]
    EmptyId,
    #[error("participant identifier contains reserved '_': {0}")]
    ReservedDelimiter(String),
    #[error("a conversation needs two distinct participants")]
    SamePeer,
}

/// Derive the canonical channel key for an unordered pair of users.
///
/// Pure and order-independent: `canonical_key(a, b) == canonical_key(b, a)`.
/// Identifiers containing the delimiter are rejected so the key stays
/// injective over pairs.
pub fn canonical_key(a: &str, b: &str) -> Result<String, PairingError> {
    // Distinctness comes first: messaging yourself is always a self-message
    // error, whatever shape the identifier has.
    if a == b {
        return Err(PairingError::SamePeer);
    }
    for id in [a, b] {
        if id.is_empty() {
            return Err(PairingError::EmptyId);
        }
        if id.contains(DELIMITER) {
            return Err(PairingError::ReservedDelimiter(id.to_string()));
        }
    }

    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    Ok(format!("{KEY_PREFIX}{DELIMITER}{lo}{DELIMITER}{hi}"))
}

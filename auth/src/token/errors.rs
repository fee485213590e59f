use thiserror::Error;

/// Error type for token operations.
///
/// Validation failures deliberately collapse into the single `Invalid`
/// variant: a caller never learns whether a presented token was malformed,
/// carried a bad signature, or had expired. Exposing the distinction would
/// hand an attacker an oracle over token internals.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid or expired")]
    Invalid,
}

use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token secret is missing")]
    MissingSecret,

    #[error("Token secret too short: minimum {min} bytes, got {actual}")]
    WeakSecret { min: usize, actual: usize },

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}

use thiserror::Error;

use crate::domain::errors::ErrorClass;

/// Why a request carries no usable identity.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format. Expected: Bearer <token>")]
    MalformedHeader,

    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    #[error("Token subject is not a user id: {0}")]
    InvalidSubject(String),

    #[error("Token subject no longer exists: {0}")]
    UnknownUser(String),

    #[error("Identity lookup failed: {0}")]
    Lookup(String),
}

impl IdentityError {
    pub fn class(&self) -> ErrorClass {
        match self {
            IdentityError::Lookup(_) => ErrorClass::Fault,
            _ => ErrorClass::Unauthenticated,
        }
    }
}

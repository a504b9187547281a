use thiserror::Error;

use crate::domain::errors::ErrorClass;
use crate::domain::errors::ValidationErrors;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for display name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserNameError {
    #[error("Name too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password policy violations at signup
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,
}

/// Error for stored user status values
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserStatusError {
    #[error("Unknown user status: {0}")]
    Unknown(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid signup data: {0}")]
    Validation(#[from] ValidationErrors),

    // Domain-level errors
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Password(String),

    #[error("Token generation failed: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl UserError {
    pub fn class(&self) -> ErrorClass {
        match self {
            UserError::Validation(_) => ErrorClass::Validation,
            UserError::EmailAlreadyExists(_) => ErrorClass::Conflict,
            UserError::InvalidCredentials => ErrorClass::Unauthenticated,
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ErrorClass::Fault,
        }
    }
}

impl From<EmailError> for UserError {
    fn from(err: EmailError) -> Self {
        UserError::DatabaseError(format!("Stored email is invalid: {}", err))
    }
}

impl From<UserNameError> for UserError {
    fn from(err: UserNameError) -> Self {
        UserError::DatabaseError(format!("Stored name is invalid: {}", err))
    }
}

impl From<UserStatusError> for UserError {
    fn from(err: UserStatusError) -> Self {
        UserError::DatabaseError(err.to_string())
    }
}

use thiserror::Error;

use crate::domain::errors::ErrorClass;
use crate::domain::errors::ValidationErrors;

/// Error for slug parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("Slug is empty")]
    Empty,

    #[error("Slug may only contain lowercase letters, digits and single dashes: {0}")]
    InvalidFormat(String),
}

/// Error for post title validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostTitleError {
    #[error("Title too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for post body validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostBodyError {
    #[error("Body too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Error for post status parsing
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostStatusError {
    #[error("Unknown post status '{0}', expected PUBLISHED or DRAFT")]
    Unknown(String),
}

/// Error for page parameter parsing
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page does not exist")]
    DoesNotExist,
}

/// Top-level error for all post-related operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post data: {0}")]
    Validation(#[from] ValidationErrors),

    // Domain-level errors
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Slug already exists: {0}")]
    SlugAlreadyExists(String),

    #[error("No free slug could be derived from '{0}'")]
    SlugExhausted(String),

    #[error("Nothing to update")]
    NothingToUpdate,

    #[error("Invalid cover: {0}")]
    InvalidCover(String),

    // Infrastructure errors
    #[error("Cover storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl PostError {
    pub fn class(&self) -> ErrorClass {
        match self {
            PostError::Validation(_) => ErrorClass::Validation,
            PostError::NotFound(_) => ErrorClass::NotFound,
            PostError::SlugAlreadyExists(_) => ErrorClass::Conflict,
            PostError::NothingToUpdate | PostError::InvalidCover(_) => ErrorClass::Unprocessable,
            PostError::SlugExhausted(_)
            | PostError::Storage(_)
            | PostError::DatabaseError(_) => ErrorClass::Fault,
        }
    }
}

impl From<PageError> for PostError {
    fn from(err: PageError) -> Self {
        PostError::Validation(crate::domain::errors::FieldError::new("page", err).into())
    }
}

impl From<SlugError> for PostError {
    fn from(err: SlugError) -> Self {
        PostError::DatabaseError(format!("Stored slug is invalid: {}", err))
    }
}

impl From<PostTitleError> for PostError {
    fn from(err: PostTitleError) -> Self {
        PostError::DatabaseError(format!("Stored title is invalid: {}", err))
    }
}

impl From<PostBodyError> for PostError {
    fn from(err: PostBodyError) -> Self {
        PostError::DatabaseError(format!("Stored body is invalid: {}", err))
    }
}

impl From<PostStatusError> for PostError {
    fn from(err: PostStatusError) -> Self {
        PostError::DatabaseError(err.to_string())
    }
}

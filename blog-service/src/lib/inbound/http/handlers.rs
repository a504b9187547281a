use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::errors::ErrorClass;
use crate::domain::errors::FieldError;
use crate::identity::errors::IdentityError;
use crate::post::errors::PostError;
use crate::user::errors::UserError;

pub mod account;
pub mod admin;
pub mod ping;
pub mod posts;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    Validation(Vec<FieldError>),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    NotImplemented(String),
}

impl ApiError {
    /// Map a domain outcome class onto its HTTP status family.
    fn classified(class: ErrorClass, message: String) -> Self {
        match class {
            ErrorClass::Validation => ApiError::BadRequest(message),
            ErrorClass::Unauthenticated => {
                tracing::debug!(reason = %message, "Request unauthenticated");
                ApiError::Unauthorized("Unauthorized".to_string())
            }
            ErrorClass::NotFound => ApiError::NotFound(message),
            ErrorClass::Conflict => ApiError::Conflict(message),
            ErrorClass::Unprocessable => ApiError::UnprocessableEntity(message),
            ErrorClass::Fault => {
                tracing::error!(error = %message, "Request failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, vec![]),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, vec![]),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, vec![]),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Invalid input".to_string(),
                errors,
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, vec![]),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, vec![]),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, vec![]),
            ApiError::NotImplemented(msg) => (StatusCode::NOT_IMPLEMENTED, msg, vec![]),
        };

        (
            status,
            Json(ApiResponseBody::new_error(status, message, errors)),
        )
            .into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(errors) => ApiError::Validation(errors.into_errors()),
            err => Self::classified(err.class(), err.to_string()),
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::Validation(errors) => ApiError::Validation(errors.into_errors()),
            err => Self::classified(err.class(), err.to_string()),
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        Self::classified(err.class(), err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String, errors: Vec<FieldError>) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message, errors },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

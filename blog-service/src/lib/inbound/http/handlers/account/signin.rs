use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::SessionResponseData;
use crate::domain::user::models::SigninCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninRequest>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let command = SigninCommand {
        email: body.email,
        password: body.password,
    };

    state
        .user_service
        .signin(command)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

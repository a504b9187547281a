use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::SessionResponseData;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let command = body.try_into_command().map_err(UserError::from)?;

    state
        .user_service
        .signup(command)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for signup (raw JSON)
///
/// Missing fields are reported as validation failures, not as JSON errors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl SignupRequest {
    fn try_into_command(
        self,
    ) -> Result<SignupCommand, crate::domain::errors::ValidationErrors> {
        SignupCommand::new(self.name, self.email, self.password)
    }
}

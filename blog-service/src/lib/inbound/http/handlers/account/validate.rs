use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::UserData;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Echo the identity the bearer token resolves to.
pub async fn validate(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> ApiSuccess<ValidateResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        ValidateResponseData {
            user: (&user).into(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateResponseData {
    pub user: UserData,
}

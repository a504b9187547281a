use axum::extract::Multipart;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::form::PostForm;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::posts::PostData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(author)): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let command = PostForm::from_multipart(multipart)
        .await?
        .into_create_command()
        .map_err(PostError::from)?;

    state
        .post_service
        .create(&author, command)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::CREATED, view.into()))
}

use axum::extract::Multipart;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::form::PostForm;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::posts::parse_slug;
use crate::inbound::http::handlers::posts::PostData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::post::errors::PostError;

pub async fn edit_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    multipart: Option<Multipart>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let slug = parse_slug(slug)?;
    let form = match multipart {
        Some(multipart) => PostForm::from_multipart(multipart).await?,
        None => PostForm::default(),
    };
    let command = form
        .into_update_command()
        .map_err(PostError::from)?;

    state
        .post_service
        .edit(&slug, command)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}

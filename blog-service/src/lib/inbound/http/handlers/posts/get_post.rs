use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_slug;
use super::PostData;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Public read; drafts answer 404 exactly like missing posts.
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let slug = parse_slug(slug)?;

    state
        .post_service
        .get_by_slug(&slug, false)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}

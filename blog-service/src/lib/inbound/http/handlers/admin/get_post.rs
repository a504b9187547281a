use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::posts::parse_slug;
use crate::inbound::http::handlers::posts::PostData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Admin read; drafts included.
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let slug = parse_slug(slug)?;

    state
        .post_service
        .get_by_slug(&slug, true)
        .await
        .map_err(ApiError::from)
        .map(|ref view| ApiSuccess::new(StatusCode::OK, view.into()))
}

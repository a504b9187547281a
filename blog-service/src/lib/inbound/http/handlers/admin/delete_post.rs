use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::posts::parse_slug;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    let slug = parse_slug(slug)?;

    state
        .post_service
        .delete(&slug)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::posts::PageQuery;
use crate::inbound::http::handlers::posts::PostListResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiSuccess<PostListResponseData>, ApiError> {
    let page = query.page()?;

    state
        .post_service
        .list_for_admin(page)
        .await
        .map_err(ApiError::from)
        .map(|views| ApiSuccess::new(StatusCode::OK, PostListResponseData::new(page, &views)))
}

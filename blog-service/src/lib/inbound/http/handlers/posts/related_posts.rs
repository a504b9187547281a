use axum::extract::Path;

use crate::inbound::http::handlers::ApiError;

pub async fn related_posts(Path(_slug): Path<String>) -> ApiError {
    ApiError::NotImplemented("Related posts are not implemented".to_string())
}

use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn ping() -> ApiSuccess<PingResponseData> {
    ApiSuccess::new(StatusCode::OK, PingResponseData { pong: true })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingResponseData {
    pub pong: bool,
}

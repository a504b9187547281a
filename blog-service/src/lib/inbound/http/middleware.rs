use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::identity::errors::IdentityError;
use crate::domain::user::models::PublicUser;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension carrying the resolved caller of an authenticated route
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub PublicUser);

/// Middleware that resolves the bearer token to a user and adds it to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map(str::to_string))
        .transpose()
        .map_err(|_| ApiError::from(IdentityError::MalformedHeader))?;

    let user = state
        .identity_resolver
        .resolve(authorization.as_deref())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, uri = %req.uri(), "Authentication rejected");
            ApiError::from(e)
        })?;

    tracing::debug!(user_id = %user.id, "Request authenticated");
    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}

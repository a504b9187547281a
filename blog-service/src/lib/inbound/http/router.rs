use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::account;
use super::handlers::admin;
use super::handlers::ping::ping;
use super::handlers::posts;
use super::middleware::authenticate as auth_middleware;
use crate::domain::identity::ports::IdentityResolverPort;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::ports::UserServicePort;
use crate::outbound::storage::local::COVERS_ROUTE;

/// Upper bound on a multipart post form, cover included.
const MAX_FORM_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub identity_resolver: Arc<dyn IdentityResolverPort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    post_service: Arc<dyn PostServicePort>,
    identity_resolver: Arc<dyn IdentityResolverPort>,
    covers_dir: &Path,
) -> Router {
    let state = AppState {
        user_service,
        post_service,
        identity_resolver,
    };

    let public_routes = Router::new()
        .route("/api/ping", get(ping))
        .route("/api/auth/signup", post(account::signup))
        .route("/api/auth/signin", post(account::signin))
        .route("/api/posts", get(posts::list_posts))
        .route("/api/posts/:slug", get(posts::get_post))
        .route("/api/posts/:slug/related", get(posts::related_posts));

    let protected_routes = Router::new()
        .route("/api/auth/validate", post(account::validate))
        .route(
            "/api/admin/posts",
            get(admin::list_posts).post(admin::create_post),
        )
        .route(
            "/api/admin/posts/:slug",
            get(admin::get_post)
                .put(admin::edit_post)
                .delete(admin::delete_post),
        )
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service(COVERS_ROUTE, ServeDir::new(covers_dir))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

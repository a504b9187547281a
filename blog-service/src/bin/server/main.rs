use std::sync::Arc;

use auth::Authenticator;
use auth::TokenSecret;
use blog_service::config::Config;
use blog_service::domain::identity::resolver::IdentityResolver;
use blog_service::domain::post::service::PostService;
use blog_service::domain::user::service::UserService;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::repositories::PostgresPostRepository;
use blog_service::outbound::repositories::PostgresUserRepository;
use blog_service::outbound::storage::LocalCoverStorage;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        covers_dir = %config.storage.covers_dir.display(),
        page_size = config.posts.page_size,
        token_expiration_hours = ?config.jwt.expiration_hours,
        "Configuration loaded"
    );

    // Refuse to start with a missing or weak signing secret.
    let token_secret = TokenSecret::new(config.jwt.secret.as_str()).map_err(|e| {
        tracing::error!(error = %e, "Invalid JWT__SECRET");
        e
    })?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let cover_storage = Arc::new(LocalCoverStorage::new(
        config.storage.covers_dir.clone(),
        config.storage.public_base_url.clone(),
    ));
    cover_storage.init().await?;

    let authenticator = Arc::new(Authenticator::new(&token_secret, config.jwt.lifetime()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));
    let identity_resolver = Arc::new(IdentityResolver::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));
    let post_service = Arc::new(PostService::new(
        post_repository,
        Arc::clone(&cover_storage),
        config.posts.page_size,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        post_service,
        identity_resolver,
        &config.storage.covers_dir,
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}

use std::sync::Arc;

use auth_service::auth::ports::AuthServicePort;
use auth_service::auth::service::AuthService;
use auth_service::config::Config;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::cache::RedisTokenCache;
use auth_service::outbound::repositories::PostgresUserRepository;
use credentials::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_seconds = config.auth.token_ttl_seconds,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_cache = Arc::new(RedisTokenCache::connect(&config.cache.url).await?);
    tracing::info!(cache = "redis", "Session cache connected");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));

    let password_hasher = PasswordHasher::with_params(
        config.auth.hash_memory_kib,
        config.auth.hash_iterations,
        config.auth.hash_parallelism,
    )?;

    let auth_service: Arc<dyn AuthServicePort> = Arc::new(AuthService::new(
        user_repository,
        token_cache,
        password_hasher,
        config.auth.token_ttl(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;

    Ok(())
}

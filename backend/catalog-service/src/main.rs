/// Catalog Service Main Entry Point
///
/// Starts gRPC server with:
/// - PostgreSQL stores, or in-memory stores when DATABASE_URL is unset
/// - Token layer guarding every method except SignUp and SignIn
use anyhow::{Context, Result};
use catalog_service::{
    config::Settings,
    db::{BookStore, InMemoryBookStore, InMemoryUserStore, PgBookStore, PgUserStore, UserStore},
    security::CredentialHasher,
    services::{AuthService, BookService},
    CatalogServer,
};
use crypto_core::{assess_secret, SecretStrength, TokenCodec};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "catalog_service=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    info!("Starting Catalog Service");

    // Load configuration
    let settings = Settings::load().context("Failed to load configuration")?;
    info!("Configuration loaded successfully");

    match assess_secret(&settings.jwt.secret) {
        SecretStrength::Weak(reason) => {
            warn!(%reason, "JWT_SECRET is weak; use a long random value in production")
        }
        SecretStrength::Acceptable | SecretStrength::Strong => {}
    }

    let (users, books): (Arc<dyn UserStore>, Arc<dyn BookStore>) = match &settings.database {
        Some(database) => {
            let db_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .acquire_timeout(Duration::from_secs(5))
                .connect(&database.url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            info!(
                "Database pool initialized with {} max connections",
                database.max_connections
            );

            sqlx::migrate!("./migrations")
                .run(&db_pool)
                .await
                .context("Failed to run database migrations")?;
            info!("Database migrations completed");

            (
                Arc::new(PgUserStore::new(db_pool.clone())),
                Arc::new(PgBookStore::new(db_pool)),
            )
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory stores (data is lost on exit)");
            (
                Arc::new(InMemoryUserStore::new()),
                Arc::new(InMemoryBookStore::new()),
            )
        }
    };

    let hasher =
        CredentialHasher::new(settings.password).context("Invalid password hash settings")?;
    let auth = AuthService::new(
        users,
        hasher,
        TokenCodec::new(&settings.jwt.secret),
        settings.jwt.token_ttl(),
    );
    let books = BookService::new(books);

    let addr = settings.server.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    CatalogServer::new(auth, books)
        .serve(listener, shutdown_signal())
        .await
        .context("gRPC server error")?;

    info!("Catalog service shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

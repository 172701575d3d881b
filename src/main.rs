//! NoteHub server entry point.
//!
//! Wires configuration, secrets, the database pool, and the auth core
//! together and starts the HTTP server.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use notehub_api::state::AppState;
use notehub_auth::{AuthService, CredentialHasher, TokenIssuer, TokenVerifier};
use notehub_cache::{EnvSecretSource, SecretCache};
use notehub_core::config::AppConfig;
use notehub_core::error::AppError;
use notehub_database::repositories::{
    NoteRepository, OrganizationRepository, RefreshTokenRepository, RoleRepository, UserRepository,
};
use notehub_database::DatabasePool;
use notehub_entity::store::{
    NoteStore, OrganizationStore, RefreshTokenStore, RoleStore, UserStore,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("NOTEHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting NoteHub v{}", env!("CARGO_PKG_VERSION"));

    // Secrets are resolved up front so a misconfigured deployment fails
    // at startup, not on the first login.
    let secrets = SecretCache::new(&config.secrets, Arc::new(EnvSecretSource::new()));
    let access_secret = secrets.get(&config.auth.access_token_secret_name).await?;
    let refresh_secret = secrets.get(&config.auth.refresh_token_secret_name).await?;
    let password_secret = secrets.get(&config.auth.password_secret_name).await?;

    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    notehub_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(db.pool().clone()));
    let organizations: Arc<dyn OrganizationStore> =
        Arc::new(OrganizationRepository::new(db.pool().clone()));
    let roles: Arc<dyn RoleStore> = Arc::new(RoleRepository::new(db.pool().clone()));
    let refresh_tokens: Arc<dyn RefreshTokenStore> =
        Arc::new(RefreshTokenRepository::new(db.pool().clone()));
    let notes: Arc<dyn NoteStore> = Arc::new(NoteRepository::new(db.pool().clone()));

    let hasher = Arc::new(CredentialHasher::new(password_secret)?);
    let issuer = Arc::new(TokenIssuer::new(
        &access_secret,
        &refresh_secret,
        config.auth.access_ttl_minutes,
        config.auth.refresh_ttl_days,
        refresh_tokens.clone(),
    )?);
    let verifier = Arc::new(TokenVerifier::new(&access_secret, &refresh_secret)?);

    let auth = Arc::new(AuthService::new(
        users.clone(),
        organizations.clone(),
        refresh_tokens,
        issuer,
        verifier.clone(),
        hasher,
    ));

    let purged = auth.purge_expired_sessions().await?;
    tracing::info!(purged, "startup purge of expired refresh tokens");
    tokio::spawn(purge_expired_sessions_loop(auth.clone()));

    let state = AppState {
        config: Arc::new(config.clone()),
        auth,
        verifier,
        users,
        organizations,
        roles,
        notes,
    };

    let app = notehub_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("NoteHub server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("NoteHub server shut down gracefully");
    Ok(())
}

/// Hourly sweep of expired refresh-token records.
///
/// Expired records are already rejected by the store's expiry filter;
/// the sweep keeps the table from growing without bound.
async fn purge_expired_sessions_loop(auth: Arc<AuthService>) {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
    // The first tick fires immediately; startup already purged.
    interval.tick().await;
    loop {
        interval.tick().await;
        match auth.purge_expired_sessions().await {
            Ok(purged) if purged > 0 => {
                tracing::info!(purged, "purged expired refresh tokens");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Expired-token purge failed: {e}"),
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

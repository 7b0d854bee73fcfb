//! Server bootstrap: database, migrations, seed data, and the router.

use axum::Router;
use bizdesk_core::error::BizdeskError;
use bizdesk_db::{DbError, DbManager};
use tokio::net::TcpListener;
use tracing::info;

use crate::api;
use crate::config::{ConfigError, ServerConfig};
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("database connection failed: {0}")]
    Connect(#[from] surrealdb::Error),

    #[error(transparent)]
    Migration(#[from] DbError),

    #[error(transparent)]
    Domain(#[from] BizdeskError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    api::router().with_state(state)
}

/// Connect, migrate, seed, and build state from `config`.
pub async fn bootstrap(config: &ServerConfig) -> Result<AppState, ServerError> {
    let db = DbManager::connect(&config.db).await?;
    bizdesk_db::run_migrations(db.client()).await?;
    let seeded = bizdesk_db::seed_permissions(db.client()).await?;
    info!(permissions = seeded.len(), "Permission catalog ready");

    if !config.policy.is_enforced() {
        tracing::warn!("Access guard is permissive; denials are logged, not enforced");
    }

    Ok(AppState::new(
        db.client().clone(),
        config.auth.clone(),
        config.policy,
    ))
}

/// Serve until ctrl-c.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = bootstrap(&config).await?;
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, policy = ?config.policy, "Listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

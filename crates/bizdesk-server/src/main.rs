//! bizdesk server: application entry point.

use bizdesk_server::{ServerConfig, ServerError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    tracing::info!("Starting bizdesk server...");

    let config = ServerConfig::from_env()?;
    bizdesk_server::run(config).await?;

    tracing::info!("bizdesk server stopped.");
    Ok(())
}

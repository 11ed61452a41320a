//! Event Tracker HTTP Server Binary
//!
//! Entry point for the booking REST API server. It resolves the
//! repository backend, wires the service layer, and starts serving.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin event-tracker-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use event_tracker::config::{RepositoryConfig, ServerConfig};
use event_tracker::db::RepositoryFactory;
use event_tracker::http::{create_router, AppState};
use event_tracker::services::LogAudit;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting Event Tracker HTTP Server");

    // Resolve the repository backend: repository.toml if present,
    // otherwise the in-memory default.
    let repository = match RepositoryConfig::from_default_location() {
        Ok(config) => {
            let repo_type = config.repository_type()?;
            info!("Using configured repository backend: {:?}", repo_type);
            RepositoryFactory::create(repo_type)?
        }
        Err(e) => {
            warn!("No repository config found ({}), using in-memory backend", e);
            RepositoryFactory::create_local()
        }
    };
    info!("Repository initialized successfully");

    // Create application state
    let state = AppState::new(repository, Arc::new(LogAudit));

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let config = ServerConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let addr: SocketAddr = config.bind_address().parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

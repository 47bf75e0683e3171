//! Folio Server
//!
//! Serves the portfolio front-end and its local persistence API.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use folio_core::{InMemoryStorage, SqliteStorage, Storage};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_server::{
    routes, AppState, Config, ConsoleRelay, ContactRelay, EmailJsRelay, RelayConfig, SmtpRelay,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_server=debug,folio_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        port = config.port,
        db_path = ?config.db_path,
        static_dir = %config.static_dir.display(),
        relay = config.relay.kind(),
        "Loaded configuration"
    );

    let storage: Arc<dyn Storage> = match &config.db_path {
        Some(path) => Arc::new(SqliteStorage::open(path)?),
        None => {
            tracing::warn!("FOLIO_DB_PATH not set, data will be lost on exit");
            Arc::new(InMemoryStorage::new())
        }
    };

    let relay = build_relay(config.relay.clone()).await?;

    let state = Arc::new(AppState::new(storage, relay)?);
    let app = routes::create_router_with_static_path(state, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Folio listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_relay(config: RelayConfig) -> Result<Box<dyn ContactRelay>> {
    let relay: Box<dyn ContactRelay> = match config {
        RelayConfig::EmailJs(emailjs) => Box::new(EmailJsRelay::new(emailjs)),
        RelayConfig::Smtp(smtp) => {
            // Connection test blocks
            let relay = tokio::task::spawn_blocking(move || SmtpRelay::new(smtp))
                .await?
                .map_err(|e| anyhow!(e))?;
            Box::new(relay)
        }
        RelayConfig::Console => Box::new(ConsoleRelay::new()),
    };
    Ok(relay)
}

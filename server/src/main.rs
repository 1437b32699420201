mod config;
mod routes;
mod state;
mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::state::AppState;
use crate::store::{FileStore, MemoryStore, SvgStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Loaded before the subscriber so a `.env` can set RUST_LOG.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "ignoring unreadable .env");
        }
    }

    let config = ServerConfig::from_env()?;

    let store: Arc<dyn SvgStore> = match &config.store_dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "storing shares on disk");
            Arc::new(FileStore::open(dir).await?)
        }
        None => {
            tracing::warn!("SVG_STORE_DIR not set, shares are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store, config.max_svg_bytes);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!(
        port = config.port,
        max_svg_bytes = config.max_svg_bytes,
        public_base_url = config.public_base_url.as_deref().unwrap_or("-"),
        "share server listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

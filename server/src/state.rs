//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the storage backend chosen at startup and the upload size limit.

use std::sync::Arc;

use crate::store::SvgStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SvgStore>,
    pub max_svg_bytes: usize,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn SvgStore>, max_svg_bytes: usize) -> Self {
        Self { store, max_svg_bytes }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::config::DEFAULT_MAX_SVG_BYTES;
    use crate::store::MemoryStore;

    /// An `AppState` backed by a fresh `MemoryStore`.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), DEFAULT_MAX_SVG_BYTES)
    }

    /// Like [`test_app_state`] with a custom size limit.
    #[must_use]
    pub fn test_app_state_with_limit(max_svg_bytes: usize) -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), max_svg_bytes)
    }

    /// Serve `state` on an ephemeral local port and return its base URL.
    pub async fn spawn_app(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, crate::routes::app(state))
                .await
                .expect("test server failed");
        });
        format!("http://{addr}")
    }
}

//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser uploads exported silhouettes to `/api/share` and opens the
//! returned `/view/{id}` link. CORS is open because the editor page is served
//! from a different origin than this API.

pub mod share;


use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Room for the JSON envelope and string escaping around the SVG text.
const BODY_OVERHEAD_BYTES: usize = 4096;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.max_svg_bytes.saturating_mul(2).saturating_add(BODY_OVERHEAD_BYTES);

    Router::new()
        .route(::share::wire::SHARE_PATH, post(share::create_share))
        .route("/view/{id}", get(share::view_share))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

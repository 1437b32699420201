//! Share upload and view routes.

#[cfg(test)]
#[path = "share_test.rs"]
mod share_test;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use ::share::wire::{ShareResponse, is_valid_id};

use crate::state::AppState;
use crate::store::StoreError;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Ids never change content once issued.
const VIEW_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

#[derive(Deserialize)]
pub struct CreateShareBody {
    #[serde(default)]
    pub svg: Option<String>,
}

/// `POST /api/share`: store an SVG document and return its id.
pub async fn create_share(
    State(state): State<AppState>,
    payload: Result<Json<CreateShareBody>, JsonRejection>,
) -> Result<Json<ShareResponse>, StatusCode> {
    let Json(body) = payload.map_err(rejection_to_status)?;
    let svg = body.svg.unwrap_or_default();

    if svg.len() > state.max_svg_bytes {
        tracing::warn!(bytes = svg.len(), max = state.max_svg_bytes, "share too large");
        return Err(StatusCode::PAYLOAD_TOO_LARGE);
    }
    if !looks_like_svg(&svg) {
        tracing::debug!(bytes = svg.len(), "share is not an svg document");
        return Err(StatusCode::BAD_REQUEST);
    }

    let bytes = svg.len();
    let id = state.store.put(svg).await.map_err(store_error_to_status)?;
    tracing::info!(%id, bytes, "share stored");
    Ok(Json(ShareResponse { id }))
}

/// `GET /view/{id}`: serve a stored document.
pub async fn view_share(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, StatusCode> {
    if !is_valid_id(&id) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let content = state
        .store
        .get(&id)
        .await
        .map_err(store_error_to_status)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(([(CONTENT_TYPE, SVG_CONTENT_TYPE), (CACHE_CONTROL, VIEW_CACHE_CONTROL)], content).into_response())
}

/// Whether `text` is an SVG document: `<svg` first, after an optional XML
/// declaration and leading whitespace.
pub(crate) fn looks_like_svg(text: &str) -> bool {
    let mut rest = text.trim_start();
    if rest.starts_with("<?xml") {
        let Some(end) = rest.find("?>") else {
            return false;
        };
        rest = rest[end + 2..].trim_start();
    }
    rest.starts_with("<svg")
}

pub(crate) fn rejection_to_status(rejection: JsonRejection) -> StatusCode {
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    }
}

pub(crate) fn store_error_to_status(err: StoreError) -> StatusCode {
    match err {
        StoreError::InvalidId(_) => StatusCode::BAD_REQUEST,
        StoreError::Io(_) | StoreError::IdsExhausted => {
            tracing::error!(error = %err, "share storage failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

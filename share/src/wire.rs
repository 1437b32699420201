//! Wire format of the share endpoint.
//!
//! `POST /api/share` takes `{"svg": "<svg ...>"}` and answers `{"id": "..."}`.
//! Ids are [`ID_BYTES`] random bytes rendered as lowercase hex.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};

/// Path of the upload endpoint.
pub const SHARE_PATH: &str = "/api/share";

/// Path prefix under which stored documents are served.
pub const VIEW_PATH: &str = "/view";

/// Random bytes per share id.
pub const ID_BYTES: usize = 6;

/// Length of a share id in hex characters.
pub const ID_LEN: usize = ID_BYTES * 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    pub svg: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResponse {
    pub id: String,
}

/// Whether `id` has the shape the server issues: `ID_LEN` lowercase hex digits.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LEN && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Render raw id bytes as lowercase hex.
#[must_use]
pub fn encode_id(bytes: [u8; ID_BYTES]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// `<base>/api/share`, tolerating a trailing slash on `base`.
#[must_use]
pub fn share_endpoint(base: &str) -> String {
    format!("{}{SHARE_PATH}", base.trim_end_matches('/'))
}

/// `<base>/view/<id>`, tolerating a trailing slash on `base`.
#[must_use]
pub fn view_url(base: &str, id: &str) -> String {
    format!("{}{VIEW_PATH}/{id}", base.trim_end_matches('/'))
}

/// Parse an upload response body.
///
/// # Errors
///
/// Returns a description of the problem when the body is not JSON, lacks an
/// `id`, or carries an id the server would never issue.
pub fn parse_share_response(body: &str) -> Result<ShareResponse, String> {
    let response: ShareResponse = serde_json::from_str(body).map_err(|e| e.to_string())?;
    if !is_valid_id(&response.id) {
        return Err(format!("invalid share id `{}`", response.id));
    }
    Ok(response)
}

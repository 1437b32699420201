//! HTTP client for the share endpoint.
//!
//! Thin wrapper over `reqwest`: one POST per share, response parsing in
//! [`crate::wire::parse_share_response`] so it stays testable without a
//! server.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ShareConfig;
use crate::wire::{parse_share_response, share_endpoint, view_url};

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    /// Could not reach the server or read its reply.
    #[error("share request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("share endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The server answered 2xx but the body was not a share response.
    #[error("malformed share response: {0}")]
    Malformed(String),
}

impl ShareError {
    /// Whether repeating the same request may succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        match self {
            Self::Request(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Malformed(_) => false,
        }
    }
}

/// A stored document and where to view it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub id: String,
    pub url: String,
}

#[derive(serde::Serialize)]
struct ShareBody<'a> {
    svg: &'a str,
}

pub struct ShareClient {
    http: reqwest::Client,
    base_url: String,
}

impl ShareClient {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Request`] if the HTTP client cannot be built.
    pub fn new(config: &ShareConfig) -> Result<Self, ShareError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// # Errors
    ///
    /// See [`ShareClient::new`].
    pub fn from_env() -> Result<Self, ShareError> {
        Self::new(&ShareConfig::from_env())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload `svg` and return the link it can be viewed at.
    ///
    /// # Errors
    ///
    /// [`ShareError::Request`] on transport failure, [`ShareError::Status`]
    /// for a non-2xx reply, [`ShareError::Malformed`] when a 2xx body carries
    /// no valid id.
    pub async fn share(&self, svg: &str) -> Result<ShareLink, ShareError> {
        let endpoint = share_endpoint(&self.base_url);
        let response = self.http.post(&endpoint).json(&ShareBody { svg }).send().await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        if !(200..300).contains(&status) {
            warn!(status, %endpoint, "share rejected");
            return Err(ShareError::Status { status, body: text });
        }

        let id = parse_share_response(&text).map_err(ShareError::Malformed)?.id;
        let url = view_url(&self.base_url, &id);
        debug!(%id, bytes = svg.len(), "share stored");
        Ok(ShareLink { id, url })
    }
}

//! Share protocol shared by the browser host and the storage server.
//!
//! A share uploads one exported SVG document and gets back a short id; the
//! document is then viewable at `<base>/view/<id>`. This crate holds the wire
//! types and id rules both sides agree on, plus [`ShareClient`], the HTTP
//! client the host uses to perform the upload.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`wire`] | Request/response bodies, paths, and share ids |
//! | [`client`] | `reqwest` client and [`ShareError`] |
//! | [`config`] | [`ShareConfig`] loaded from environment variables |

pub mod client;
pub mod config;
pub mod wire;

pub use client::{ShareClient, ShareError, ShareLink};
pub use config::ShareConfig;
pub use wire::{ShareRequest, ShareResponse};

//! Curve editing engine for the silhouette designer.
//!
//! The user shapes a single piecewise cubic Bézier curve that runs from the
//! top edge of the canvas to the bottom edge. This crate owns everything about
//! that curve: the anchor model, hit-testing, the drag state machine, rescaling
//! when the physical canvas size changes, self-intersection validation, and
//! export of the closed silhouette as SVG. The host page wires DOM events to
//! the [`engine::Engine`], draws from [`engine::EngineCore::curve`], and
//! performs share requests with the `share` crate's client.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`curve`] | Anchors, segments, and curve edits |
//! | [`geom`] | Points, cubic evaluation, segment intersection |
//! | [`frame`] | Canvas size and the rescale transform |
//! | [`hit`] | Hit-testing anchors, handles, and the curve body |
//! | [`input`] | Tool mode and the drag state machine |
//! | [`validate`] | Self-intersection detection |
//! | [`export`] | SVG silhouette export |
//! | [`share`] | Share-request sequencing |
//! | [`consts`] | Shared numeric constants (resolution, hit radii, margins) |

pub mod consts;
pub mod curve;
pub mod engine;
pub mod export;
pub mod frame;
pub mod geom;
pub mod hit;
pub mod input;
pub mod share;
pub mod validate;

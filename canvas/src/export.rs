//! Outline export: turns a validated curve into a closed, filled SVG silhouette.
//!
//! The silhouette is bounded by the canvas's left edge on one side and the
//! curve on the other. Before serializing, the curve is shifted horizontally so
//! its leftmost sampled point sits exactly `EXPORT_MARGIN_PX` from the left
//! edge, however far left the user dragged it.
//!
//! Path data is assembled as a raw `d` string so coordinates keep `f64`
//! precision up to `EXPORT_DECIMALS`; the `svg` crate only wraps it in the
//! document and path elements.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use svg::Document;
use svg::node::element::Path;

use crate::consts::{EXPORT_DECIMALS, EXPORT_MARGIN_PX, SAMPLE_RESOLUTION};
use crate::curve::Curve;
use crate::frame::CanvasFrame;
use crate::geom::Point;
use crate::validate::has_self_intersection;

const FILL: &str = "black";
const STROKE: &str = "black";
const STROKE_WIDTH: f64 = 1.0;

/// Why an export was declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    /// The curve crosses itself; the outline would not be a simple shape.
    #[error("curve crosses itself")]
    SelfIntersecting,
    /// Fewer than two anchors: there is no curve to export.
    #[error("nothing to export ({count} anchors)")]
    InsufficientAnchors { count: usize },
}

impl ExportError {
    /// Text to show the user, or `None` when the refusal should stay silent.
    #[must_use]
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::SelfIntersecting => {
                Some("The curve crosses itself. Move the points so it no longer overlaps, then try again.")
            }
            Self::InsufficientAnchors { .. } => None,
        }
    }
}

/// Check that `curve` can be exported.
///
/// # Errors
///
/// Returns [`ExportError::InsufficientAnchors`] for fewer than two anchors and
/// [`ExportError::SelfIntersecting`] when the sampled curve crosses itself.
pub fn check_exportable(curve: &Curve) -> Result<(), ExportError> {
    if curve.len() < 2 {
        return Err(ExportError::InsufficientAnchors { count: curve.len() });
    }
    if has_self_intersection(curve) {
        return Err(ExportError::SelfIntersecting);
    }
    Ok(())
}

/// Horizontal offset that puts the curve's leftmost sampled point on the margin.
///
/// Returns `None` when the curve has no segments.
#[must_use]
pub fn margin_shift(curve: &Curve) -> Option<f64> {
    let min_x = curve
        .polyline(SAMPLE_RESOLUTION)
        .iter()
        .map(|p| p.x)
        .min_by(f64::total_cmp)?;
    Some(EXPORT_MARGIN_PX - min_x)
}

/// Path data of the closed silhouette with every curve point shifted by `dx`.
///
/// Bottom-left corner, up the left edge, across to the first anchor, one
/// cubic per segment, then back to the bottom-left corner.
#[must_use]
pub fn outline_path_data(curve: &Curve, frame: CanvasFrame, dx: f64) -> String {
    let shift = |p: Point| Point::new(p.x + dx, p.y);
    let h = fmt_num(frame.height_px);

    let mut d = format!("M 0 {h} L 0 0");
    if let Some(first) = curve.anchors().first() {
        let p = shift(first.position);
        d.push_str(&format!(" L {} {}", fmt_num(p.x), fmt_num(p.y)));
    }
    for seg in curve.segments() {
        let (c1, c2, end) = (shift(seg.p1), shift(seg.p2), shift(seg.p3));
        d.push_str(&format!(
            " C {} {} {} {} {} {}",
            fmt_num(c1.x),
            fmt_num(c1.y),
            fmt_num(c2.x),
            fmt_num(c2.y),
            fmt_num(end.x),
            fmt_num(end.y)
        ));
    }
    d.push_str(&format!(" L 0 {h} Z"));
    d
}

/// Validate `curve` and serialize its silhouette as a standalone SVG document.
///
/// # Errors
///
/// Same conditions as [`check_exportable`]; no markup is produced on error.
pub fn export_svg(curve: &Curve, frame: CanvasFrame) -> Result<String, ExportError> {
    check_exportable(curve)?;
    let dx = margin_shift(curve).ok_or(ExportError::InsufficientAnchors { count: curve.len() })?;

    let path = Path::new()
        .set("d", outline_path_data(curve, frame, dx))
        .set("fill", FILL)
        .set("stroke", STROKE)
        .set("stroke-width", STROKE_WIDTH);

    let document = Document::new()
        .set("width", fmt_num(frame.width_px))
        .set("height", fmt_num(frame.height_px))
        .add(path);

    Ok(document.to_string())
}

/// Format a coordinate with at most `EXPORT_DECIMALS` places, trailing zeros
/// trimmed and negative zero folded into `0`.
#[must_use]
pub fn fmt_num(v: f64) -> String {
    let s = format!("{v:.prec$}", prec = EXPORT_DECIMALS);
    let s = if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s.as_str() };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

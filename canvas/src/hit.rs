//! Hit-testing a pointer position against the curve.
//!
//! Categories are checked in priority order: anchors, then handles, then the
//! curve body. Within a category the nearest candidate wins.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{ANCHOR_HIT_RADIUS_PX, CURVE_HIT_THRESHOLD_PX, HANDLE_HIT_RADIUS_PX, SAMPLE_RESOLUTION};
use crate::curve::{Curve, HandleKind};
use crate::geom::{Point, closest_on_segment};

/// What the pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    /// An anchor position.
    Anchor { index: usize },
    /// One of an anchor's tangent handles.
    Handle { index: usize, which: HandleKind },
    /// The curve body, away from any anchor or handle.
    Curve(CurveHit),
}

/// Nearest location on the sampled curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveHit {
    /// Segment containing the nearest point.
    pub segment: usize,
    /// The nearest point itself.
    pub point: Point,
    /// Distance from the query point.
    pub distance: f64,
}

/// Test what (if anything) is under `pt`.
#[must_use]
pub fn hit_test(pt: Point, curve: &Curve) -> Option<Hit> {
    if let Some(index) = nearest_anchor(pt, curve, ANCHOR_HIT_RADIUS_PX) {
        return Some(Hit::Anchor { index });
    }
    if let Some((index, which)) = nearest_handle(pt, curve, HANDLE_HIT_RADIUS_PX) {
        return Some(Hit::Handle { index, which });
    }
    nearest_on_curve(pt, curve)
        .filter(|c| c.distance <= CURVE_HIT_THRESHOLD_PX)
        .map(Hit::Curve)
}

/// Index of the closest anchor within `radius` of `pt`.
#[must_use]
pub fn nearest_anchor(pt: Point, curve: &Curve, radius: f64) -> Option<usize> {
    curve
        .anchors()
        .iter()
        .enumerate()
        .map(|(i, a)| (i, a.position.distance(pt)))
        .filter(|&(_, d)| d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// The closest present handle within `radius` of `pt`.
#[must_use]
pub fn nearest_handle(pt: Point, curve: &Curve, radius: f64) -> Option<(usize, HandleKind)> {
    curve
        .anchors()
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            [HandleKind::Incoming, HandleKind::Outgoing]
                .into_iter()
                .filter_map(move |which| a.handle(which).map(|h| (i, which, h.distance(pt))))
        })
        .filter(|&(_, _, d)| d <= radius)
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(i, which, _)| (i, which))
}

/// Closest point to `pt` on any segment, measured against the same sampled
/// polyline that validation and export use.
#[must_use]
pub fn nearest_on_curve(pt: Point, curve: &Curve) -> Option<CurveHit> {
    let mut best: Option<CurveHit> = None;
    for (segment, seg) in curve.segments().enumerate() {
        let samples = seg.sample(SAMPLE_RESOLUTION);
        for pair in samples.windows(2) {
            let point = closest_on_segment(pt, pair[0], pair[1]);
            let distance = point.distance(pt);
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(CurveHit { segment, point, distance });
            }
        }
    }
    best
}

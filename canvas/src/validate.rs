//! Self-intersection check run before every export.
//!
//! The whole curve is flattened into one polyline at [`SAMPLE_RESOLUTION`]
//! and every pair of non-adjacent sub-segments is tested. Cost is quadratic in
//! the sample count, which stays small for hand-edited profiles.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::consts::SAMPLE_RESOLUTION;
use crate::curve::Curve;
use crate::geom::segments_intersect;

/// Whether the sampled curve crosses itself anywhere.
#[must_use]
pub fn has_self_intersection(curve: &Curve) -> bool {
    find_self_intersection(curve).is_some()
}

/// The first crossing pair `(i, j)` of polyline sub-segments, where sub-segment
/// `k` runs from sample `k` to sample `k + 1` and `j >= i + 2`.
#[must_use]
pub fn find_self_intersection(curve: &Curve) -> Option<(usize, usize)> {
    let pts = curve.polyline(SAMPLE_RESOLUTION);
    let count = pts.len().saturating_sub(1);
    for i in 0..count {
        for j in (i + 2)..count {
            if segments_intersect(pts[i], pts[i + 1], pts[j], pts[j + 1]) {
                return Some((i, j));
            }
        }
    }
    None
}

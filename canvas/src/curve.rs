//! Curve model: the ordered anchor list and the edits the controller applies.
//!
//! A [`Curve`] runs from the top boundary (`y = 0`) to the bottom boundary
//! (`y = height`). Its first and last anchors are endpoints: they carry only
//! the handle that points into the curve and may slide horizontally only.
//! Every interior anchor carries both handles. Segment `i` is the cubic from
//! anchor `i` to anchor `i + 1`.
//!
//! Mutators work in place and never reorder anchors. Edits that would break
//! the endpoint invariants (deleting an endpoint, indexing past the end) are
//! rejected by returning `false` / `None` and leave the curve untouched.

#[cfg(test)]
#[path = "curve_test.rs"]
mod curve_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HANDLE_OFFSET_PX, INSERT_HANDLE_OFFSET_PX};
use crate::frame::CanvasFrame;
use crate::geom::{CubicSegment, Point};

/// Which tangent handle of an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleKind {
    /// Shapes the segment ending at the anchor.
    Incoming,
    /// Shapes the segment starting at the anchor.
    Outgoing,
}

/// A point the curve passes through, with its tangent handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Canvas-space position.
    pub position: Point,
    /// Control point of the segment ending here. Absent on the first anchor.
    pub incoming: Option<Point>,
    /// Control point of the segment starting here. Absent on the last anchor.
    pub outgoing: Option<Point>,
    /// First or last anchor of the curve.
    pub is_endpoint: bool,
    /// Pinned to its boundary; only x may change.
    pub y_locked: bool,
}

impl Anchor {
    /// An interior anchor with both handles.
    #[must_use]
    pub fn interior(position: Point, incoming: Point, outgoing: Point) -> Self {
        Self { position, incoming: Some(incoming), outgoing: Some(outgoing), is_endpoint: false, y_locked: false }
    }

    /// The first anchor of a curve (top boundary).
    #[must_use]
    pub fn start(position: Point, outgoing: Point) -> Self {
        Self { position, incoming: None, outgoing: Some(outgoing), is_endpoint: true, y_locked: true }
    }

    /// The last anchor of a curve (bottom boundary).
    #[must_use]
    pub fn end(position: Point, incoming: Point) -> Self {
        Self { position, incoming: Some(incoming), outgoing: None, is_endpoint: true, y_locked: true }
    }

    /// The requested handle, if present.
    #[must_use]
    pub fn handle(&self, which: HandleKind) -> Option<Point> {
        match which {
            HandleKind::Incoming => self.incoming,
            HandleKind::Outgoing => self.outgoing,
        }
    }

    fn handle_mut(&mut self, which: HandleKind) -> Option<&mut Point> {
        match which {
            HandleKind::Incoming => self.incoming.as_mut(),
            HandleKind::Outgoing => self.outgoing.as_mut(),
        }
    }

    fn for_each_point_mut(&mut self, mut f: impl FnMut(&mut Point)) {
        f(&mut self.position);
        if let Some(h) = self.incoming.as_mut() {
            f(h);
        }
        if let Some(h) = self.outgoing.as_mut() {
            f(h);
        }
    }
}

/// The cubic segment from `a` to `b`.
///
/// A missing handle falls back to its anchor's position, which only happens for
/// pairs that are not consecutive anchors of a well-formed curve.
#[must_use]
pub fn segment_between(a: &Anchor, b: &Anchor) -> CubicSegment {
    CubicSegment::new(
        a.position,
        a.outgoing.unwrap_or(a.position),
        b.incoming.unwrap_or(b.position),
        b.position,
    )
}

/// Point on the segment from `a` to `b` at parameter `t`.
#[must_use]
pub fn evaluate(t: f64, a: &Anchor, b: &Anchor) -> Point {
    segment_between(a, b).eval(t)
}

/// `n + 1` evenly parametrized points on the segment from `a` to `b`.
#[must_use]
pub fn sample(a: &Anchor, b: &Anchor, n: usize) -> Vec<Point> {
    segment_between(a, b).sample(n)
}

/// Ordered anchors from the top boundary to the bottom boundary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Curve {
    anchors: Vec<Anchor>,
}

impl Curve {
    /// The straight vertical starting curve, centered horizontally in `frame`.
    ///
    /// Handles sit `DEFAULT_HANDLE_OFFSET_PX` inside their endpoints, shortened
    /// to a third of the height on short frames so they never pass each other.
    #[must_use]
    pub fn new_default(frame: CanvasFrame) -> Self {
        let x = frame.width_px / 2.0;
        let bottom = frame.height_px;
        let offset = DEFAULT_HANDLE_OFFSET_PX.min(bottom / 3.0);
        Self {
            anchors: vec![
                Anchor::start(Point::new(x, 0.0), Point::new(x, offset)),
                Anchor::end(Point::new(x, bottom), Point::new(x, bottom - offset)),
            ],
        }
    }

    /// Build a curve from explicit anchors. The caller is responsible for the
    /// endpoint/handle invariants; see [`Curve::is_well_formed`].
    #[must_use]
    pub fn from_anchors(anchors: Vec<Anchor>) -> Self {
        Self { anchors }
    }

    #[must_use]
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    #[must_use]
    pub fn anchor(&self, index: usize) -> Option<&Anchor> {
        self.anchors.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Number of segments (`len - 1`, or zero for fewer than two anchors).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.anchors.len().saturating_sub(1)
    }

    #[must_use]
    pub fn segment(&self, index: usize) -> Option<CubicSegment> {
        let a = self.anchors.get(index)?;
        let b = self.anchors.get(index + 1)?;
        Some(segment_between(a, b))
    }

    pub fn segments(&self) -> impl Iterator<Item = CubicSegment> + '_ {
        self.anchors.windows(2).map(|w| segment_between(&w[0], &w[1]))
    }

    /// Every segment sampled at resolution `n`, joined into one polyline.
    ///
    /// Shared anchors appear once: segment `k`'s last sample is segment
    /// `k + 1`'s first, so only the first segment contributes its start.
    #[must_use]
    pub fn polyline(&self, n: usize) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.segment_count() * n + 1);
        for (k, seg) in self.segments().enumerate() {
            let samples = seg.sample(n);
            let skip = usize::from(k > 0);
            points.extend(samples.into_iter().skip(skip));
        }
        points
    }

    /// Whether the endpoint and handle invariants hold.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let n = self.anchors.len();
        if n < 2 {
            return false;
        }
        self.anchors.iter().enumerate().all(|(i, a)| {
            let first = i == 0;
            let last = i == n - 1;
            let endpoint = first || last;
            a.is_endpoint == endpoint
                && a.y_locked == endpoint
                && a.incoming.is_some() != first
                && a.outgoing.is_some() != last
        })
    }

    /// Insert an interior anchor inside segment `segment_index`.
    ///
    /// The new anchor gets horizontal handles `INSERT_HANDLE_OFFSET_PX` either
    /// side of it and lands at `segment_index + 1`, which is returned. Returns
    /// `None` without touching the curve when the segment does not exist.
    pub fn insert_anchor(&mut self, segment_index: usize, position: Point) -> Option<usize> {
        if segment_index >= self.segment_count() {
            return None;
        }
        let anchor = Anchor::interior(
            position,
            Point::new(position.x - INSERT_HANDLE_OFFSET_PX, position.y),
            Point::new(position.x + INSERT_HANDLE_OFFSET_PX, position.y),
        );
        let index = segment_index + 1;
        self.anchors.insert(index, anchor);
        Some(index)
    }

    /// Remove an interior anchor together with its handles.
    ///
    /// Endpoints and out-of-range indices are left alone and return `false`.
    pub fn delete_anchor(&mut self, index: usize) -> bool {
        match self.anchors.get(index) {
            Some(a) if !a.is_endpoint => {
                self.anchors.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Move an anchor, carrying its handles by the same offset.
    ///
    /// A y-locked anchor only takes the new x.
    pub fn move_anchor(&mut self, index: usize, new_position: Point) -> bool {
        let Some(anchor) = self.anchors.get_mut(index) else {
            return false;
        };
        let mut delta = new_position - anchor.position;
        if anchor.y_locked {
            delta.y = 0.0;
        }
        anchor.for_each_point_mut(|p| *p = *p + delta);
        true
    }

    /// Move one handle anywhere. Fails if the anchor or that handle is absent.
    pub fn move_handle(&mut self, index: usize, which: HandleKind, new_position: Point) -> bool {
        let Some(handle) = self.anchors.get_mut(index).and_then(|a| a.handle_mut(which)) else {
            return false;
        };
        *handle = new_position;
        true
    }

    /// Scale every anchor and handle coordinate component-wise.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        for anchor in &mut self.anchors {
            anchor.for_each_point_mut(|p| *p = p.scale(sx, sy));
        }
    }

    /// Snap y-locked anchors back onto their boundary: the first to `y = 0`,
    /// the last to `y = bottom`.
    pub fn pin_endpoints(&mut self, bottom: f64) {
        let n = self.anchors.len();
        for (i, anchor) in self.anchors.iter_mut().enumerate() {
            if !anchor.y_locked {
                continue;
            }
            anchor.position.y = if i + 1 == n && n > 1 { bottom } else { 0.0 };
        }
    }
}

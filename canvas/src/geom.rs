//! Geometry kernel: points, cubic Bézier evaluation, sampling, and the
//! segment-intersection test used by validation.
//!
//! Everything here is pure. Callers own the data; these functions only read it.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::PARALLEL_SINE_TOLERANCE;

/// A point in canvas space (CSS pixels, y pointing down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Component-wise scale.
    #[must_use]
    pub fn scale(self, sx: f64, sy: f64) -> Point {
        Point { x: self.x * sx, y: self.y * sy }
    }

    fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Four control points of a cubic Bézier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicSegment {
    #[must_use]
    pub const fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Point on the segment at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point {
            x: a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
            y: a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
        }
    }

    /// `n + 1` points at `t = i / n` for `i = 0..=n`, in parameter order.
    ///
    /// `n == 0` yields just the start point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(&self, n: usize) -> Vec<Point> {
        if n == 0 {
            return vec![self.p0];
        }
        let step = 1.0 / n as f64;
        // The last sample is pinned so it lands exactly on p3.
        (0..n)
            .map(|i| self.eval(i as f64 * step))
            .chain(std::iter::once(self.p3))
            .collect()
    }
}

/// Whether segment `p1→p2` crosses segment `q1→q2`.
///
/// Parallel or collinear segments never intersect, even when they overlap.
/// Directions whose cross product is within rounding of zero (relative to the
/// segment lengths) count as parallel. Touching at an endpoint counts as an
/// intersection.
#[must_use]
pub fn segments_intersect(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let r = p2 - p1;
    let s = q2 - q1;
    let denom = r.cross(s);
    if denom.abs() <= PARALLEL_SINE_TOLERANCE * (r.dot(r) * s.dot(s)).sqrt() {
        return false;
    }
    let qp = q1 - p1;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Closest point to `p` on segment `a→b`.
#[must_use]
pub fn closest_on_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    Point { x: a.x + ab.x * t, y: a.y + ab.y * t }
}

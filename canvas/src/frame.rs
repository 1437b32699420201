//! Canvas frame (physical size in pixels) and the rescale transform applied to
//! the curve when that size changes.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT_INCHES, DEFAULT_WIDTH_INCHES, MAX_INCHES, MIN_INCHES, PX_PER_INCH};
use crate::curve::Curve;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum FrameError {
    #[error("frame width must be positive and finite, got {0}")]
    InvalidWidth(f64),
    #[error("frame height must be positive and finite, got {0}")]
    InvalidHeight(f64),
}

/// Size of the drawing area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasFrame {
    pub width_px: f64,
    pub height_px: f64,
}

impl Default for CanvasFrame {
    fn default() -> Self {
        Self { width_px: DEFAULT_WIDTH_INCHES * PX_PER_INCH, height_px: DEFAULT_HEIGHT_INCHES * PX_PER_INCH }
    }
}

impl CanvasFrame {
    /// A frame of the given pixel size.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero, negative, or not finite.
    pub fn new(width_px: f64, height_px: f64) -> Result<Self, FrameError> {
        if !(width_px.is_finite() && width_px > 0.0) {
            return Err(FrameError::InvalidWidth(width_px));
        }
        if !(height_px.is_finite() && height_px > 0.0) {
            return Err(FrameError::InvalidHeight(height_px));
        }
        Ok(Self { width_px, height_px })
    }

    /// A frame from a physical size in inches.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CanvasFrame::new`].
    pub fn from_inches(width_in: f64, height_in: f64) -> Result<Self, FrameError> {
        Self::new(width_in * PX_PER_INCH, height_in * PX_PER_INCH)
    }

    /// Like [`CanvasFrame::from_inches`], after clamping both sides into the
    /// slider range. NaN still fails.
    ///
    /// # Errors
    ///
    /// Returns an error if either input is NaN.
    pub fn from_inches_clamped(width_in: f64, height_in: f64) -> Result<Self, FrameError> {
        Self::from_inches(width_in.clamp(MIN_INCHES, MAX_INCHES), height_in.clamp(MIN_INCHES, MAX_INCHES))
    }

    /// Width in inches.
    #[must_use]
    pub fn width_inches(&self) -> f64 {
        self.width_px / PX_PER_INCH
    }

    /// Height in inches.
    #[must_use]
    pub fn height_inches(&self) -> f64 {
        self.height_px / PX_PER_INCH
    }

    /// Component-wise factors that map coordinates in `self` onto `to`.
    #[must_use]
    pub fn scale_to(&self, to: CanvasFrame) -> (f64, f64) {
        (to.width_px / self.width_px, to.height_px / self.height_px)
    }
}

/// Remap every anchor and handle from `from` onto `to`.
///
/// Endpoints are re-pinned to the new top/bottom boundaries afterwards so
/// rounding in the height ratio can never lift them off the edge. Repeated
/// calls compose: each uses the frame immediately preceding it.
pub fn rescale(curve: &mut Curve, from: CanvasFrame, to: CanvasFrame) {
    if from == to {
        return;
    }
    let (sx, sy) = from.scale_to(to);
    curve.scale(sx, sy);
    curve.pin_endpoints(to.height_px);
}

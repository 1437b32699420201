//! Shared numeric constants for the canvas crate.

// ── Frame ───────────────────────────────────────────────────────

/// CSS pixels per physical inch.
pub const PX_PER_INCH: f64 = 96.0;

/// Smallest width/height the sliders allow, in inches.
pub const MIN_INCHES: f64 = 1.0;

/// Largest width/height the sliders allow, in inches.
pub const MAX_INCHES: f64 = 8.0;

/// Default canvas width in inches.
pub const DEFAULT_WIDTH_INCHES: f64 = 3.0;

/// Default canvas height in inches.
pub const DEFAULT_HEIGHT_INCHES: f64 = 8.0;

// ── Curve ───────────────────────────────────────────────────────

/// Vertical distance of the default curve's handles from their endpoints.
pub const DEFAULT_HANDLE_OFFSET_PX: f64 = 100.0;

/// Horizontal distance of a freshly inserted anchor's handles.
pub const INSERT_HANDLE_OFFSET_PX: f64 = 50.0;

/// Samples per segment. Shared by hit-testing, validation and export so the
/// curve the user sees is the curve that gets checked.
pub const SAMPLE_RESOLUTION: usize = 100;

/// Largest sine of the angle between two sampled sub-segments that is still
/// treated as parallel. Sampling a straight curve leaves rounding noise far
/// below this.
pub const PARALLEL_SINE_TOLERANCE: f64 = 1e-9;

// ── Hit-testing ─────────────────────────────────────────────────

/// Grab radius around an anchor, in pixels.
pub const ANCHOR_HIT_RADIUS_PX: f64 = 10.0;

/// Grab radius around a tangent handle, in pixels.
pub const HANDLE_HIT_RADIUS_PX: f64 = 7.0;

/// Maximum distance from the curve that still counts as a curve click.
pub const CURVE_HIT_THRESHOLD_PX: f64 = 6.0;

// ── Export ──────────────────────────────────────────────────────

/// Left margin of the exported outline (one inch).
pub const EXPORT_MARGIN_PX: f64 = PX_PER_INCH;

/// Decimal places kept for coordinates in exported path data.
pub const EXPORT_DECIMALS: usize = 3;

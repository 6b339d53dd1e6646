//! Shared numeric constants for the chart crate.

// ── View transform ──────────────────────────────────────────────

/// Upper bound on the chart-to-screen scale factor.
pub const MAX_SCALE: f64 = 5.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Chart-pixel slop for picking a vector segment.
pub const VECTOR_HIT_TOLERANCE_PX: f64 = 30.0;

/// Chart-pixel slop around a range circle's ring.
pub const CIRCLE_HIT_TOLERANCE_PX: f64 = 25.0;

/// Chart-pixel slop for picking a waypoint.
pub const WAYPOINT_HIT_TOLERANCE_PX: f64 = 30.0;

// ── Navigation math ─────────────────────────────────────────────

/// Minutes of arc per degree; one minute of latitude is one nautical mile.
pub const MINUTES_PER_DEGREE: f64 = 60.0;

/// Length in chart pixels of the eastward step used to calibrate circle radii.
pub const CIRCLE_CALIBRATION_PX: f64 = 100.0;

// ── Drawing ─────────────────────────────────────────────────────

/// Arrowhead stroke length in chart pixels.
pub const ARROW_HEAD_LENGTH_PX: f64 = 25.0;

/// Arrowhead half-angle in degrees.
pub const ARROW_HEAD_ANGLE_DEG: f64 = 25.0;

/// Radius of a waypoint dot in chart pixels.
pub const WAYPOINT_DOT_RADIUS_PX: f64 = 10.0;

/// A3 landscape page size in PDF points, the default export target.
pub const A3_LANDSCAPE: (f64, f64) = (1191.0, 842.0);

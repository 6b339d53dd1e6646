#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{CIRCLE_HIT_TOLERANCE_PX, VECTOR_HIT_TOLERANCE_PX, WAYPOINT_HIT_TOLERANCE_PX};

/// Pick slop per element kind, in chart pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTolerances {
    /// Maximum distance from a vector's segment.
    pub vector_px: f64,
    /// Maximum distance from a circle's ring (not its interior).
    pub circle_px: f64,
    /// Maximum distance from a waypoint's position.
    pub waypoint_px: f64,
}

impl Default for HitTolerances {
    fn default() -> Self {
        Self {
            vector_px: VECTOR_HIT_TOLERANCE_PX,
            circle_px: CIRCLE_HIT_TOLERANCE_PX,
            waypoint_px: WAYPOINT_HIT_TOLERANCE_PX,
        }
    }
}

/// Distance from `p` to the segment `[a, b]`.
///
/// Projects onto the infinite line, clamps the parameter to `[0, 1]`, and
/// measures to the clamped point. A zero-length segment degrades to the
/// distance from `p` to `a`.
#[must_use]
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Distance from `p` to the ring of a circle.
#[must_use]
pub fn ring_distance(p: Point, center: Point, radius: f64) -> f64 {
    (p.distance_to(center) - radius).abs()
}

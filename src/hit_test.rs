#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// point_segment_distance
// =============================================================

#[test]
fn perpendicular_distance_inside_segment() {
    assert!(approx_eq(point_segment_distance(pt(550.0, 510.0), pt(500.0, 500.0), pt(600.0, 500.0)), 10.0));
    assert!(approx_eq(point_segment_distance(pt(550.0, 545.0), pt(500.0, 500.0), pt(600.0, 500.0)), 45.0));
}

#[test]
fn distance_clamps_before_start() {
    // Point-to-line would be 0 here; point-to-segment measures to the endpoint.
    assert!(approx_eq(point_segment_distance(pt(470.0, 500.0), pt(500.0, 500.0), pt(600.0, 500.0)), 30.0));
}

#[test]
fn distance_clamps_past_end() {
    assert!(approx_eq(point_segment_distance(pt(603.0, 504.0), pt(500.0, 500.0), pt(600.0, 500.0)), 5.0));
}

#[test]
fn distance_on_diagonal_segment() {
    let d = point_segment_distance(pt(0.0, 10.0), pt(0.0, 0.0), pt(10.0, 10.0));
    assert!(approx_eq(d, 50.0_f64.sqrt()));
}

#[test]
fn zero_length_segment_is_point_distance() {
    assert!(approx_eq(point_segment_distance(pt(3.0, 4.0), pt(0.0, 0.0), pt(0.0, 0.0)), 5.0));
}

#[test]
fn point_on_segment_is_zero() {
    assert_eq!(point_segment_distance(pt(5.0, 0.0), pt(0.0, 0.0), pt(10.0, 0.0)), 0.0);
}

// =============================================================
// ring_distance
// =============================================================

#[test]
fn ring_distance_outside() {
    assert!(approx_eq(ring_distance(pt(120.0, 0.0), pt(0.0, 0.0), 100.0), 20.0));
}

#[test]
fn ring_distance_inside() {
    assert!(approx_eq(ring_distance(pt(0.0, 70.0), pt(0.0, 0.0), 100.0), 30.0));
}

#[test]
fn ring_distance_at_center_is_radius() {
    assert!(approx_eq(ring_distance(pt(0.0, 0.0), pt(0.0, 0.0), 40.0), 40.0));
}

#[test]
fn ring_distance_zero_radius() {
    assert!(approx_eq(ring_distance(pt(3.0, 4.0), pt(0.0, 0.0), 0.0), 5.0));
}

// =============================================================
// HitTolerances
// =============================================================

#[test]
fn tolerances_default() {
    let t = HitTolerances::default();
    assert_eq!(t.vector_px, 30.0);
    assert_eq!(t.circle_px, 25.0);
    assert_eq!(t.waypoint_px, 30.0);
}

#[test]
fn tolerances_partial_json() {
    let t: HitTolerances = serde_json::from_str(r#"{ "circle_px": 12.5 }"#).unwrap();
    assert_eq!(t.circle_px, 12.5);
    assert_eq!(t.vector_px, 30.0);
}

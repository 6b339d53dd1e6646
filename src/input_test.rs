use uuid::Uuid;

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// InputEvent
// =============================================================

#[test]
fn event_finite_coordinates() {
    assert!(InputEvent::Down(pt(1.0, 2.0)).is_finite());
    assert!(InputEvent::Pinch { focal: pt(1.0, 2.0), multiplier: 1.1 }.is_finite());
}

#[test]
fn event_nan_coordinates() {
    assert!(!InputEvent::Move(pt(f64::NAN, 2.0)).is_finite());
    assert!(!InputEvent::Up(pt(1.0, f64::INFINITY)).is_finite());
    assert!(!InputEvent::LongPress(pt(f64::NEG_INFINITY, 0.0)).is_finite());
    assert!(!InputEvent::Pinch { focal: pt(1.0, 2.0), multiplier: f64::NAN }.is_finite());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}

#[test]
fn freehand_detection() {
    assert!(InputState::PlacingFreehand { origin: None, preview_end: None }.is_freehand());
    assert!(!InputState::Idle.is_freehand());
    assert!(!InputState::Panning { last_screen: pt(0.0, 0.0) }.is_freehand());
}

#[test]
fn freehand_preview_requires_origin_and_end() {
    let armed = InputState::PlacingFreehand { origin: None, preview_end: None };
    let pressed = InputState::PlacingFreehand { origin: Some(pt(1.0, 1.0)), preview_end: None };
    let drawing = InputState::PlacingFreehand { origin: Some(pt(1.0, 1.0)), preview_end: Some(pt(5.0, 6.0)) };
    assert!(armed.freehand_preview().is_none());
    assert!(pressed.freehand_preview().is_none());
    assert_eq!(drawing.freehand_preview(), Some((pt(1.0, 1.0), pt(5.0, 6.0))));
}

#[test]
fn dragging_has_no_preview() {
    let state = InputState::DraggingElement { target: Selection::Waypoint(Uuid::nil()), last_chart: pt(0.0, 0.0) };
    assert!(state.freehand_preview().is_none());
}

// =============================================================
// PendingCreate
// =============================================================

#[test]
fn pending_create_equality() {
    let a = PendingCreate::Vector { bearing_deg: 45.0, distance_nm: 2.0, kind: VectorKind::Course };
    let b = PendingCreate::Vector { bearing_deg: 45.0, distance_nm: 2.0, kind: VectorKind::Bearing };
    assert_ne!(a, b);
    assert_eq!(PendingCreate::Circle { distance_nm: 1.0 }, PendingCreate::Circle { distance_nm: 1.0 });
}

//! Input model: normalized gesture events, gesture states, and armed commands.
//!
//! The host's touch layer turns raw multi-touch into the small [`InputEvent`]
//! vocabulary below; this crate never sees individual pointers. `InputState`
//! is the gesture being tracked between press and release, carrying the
//! context needed to compute incremental deltas. `PendingCreate` is a one-shot
//! command armed by a dialog and consumed by the next release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::{Selection, VectorKind};

/// A normalized input event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// First finger touched down.
    Down(Point),
    /// The tracked finger moved.
    Move(Point),
    /// All fingers lifted.
    Up(Point),
    /// A pinch step: scale by `multiplier` around `focal`.
    Pinch { focal: Point, multiplier: f64 },
    /// A press held in place long enough to count as a long-press.
    LongPress(Point),
}

impl InputEvent {
    /// Whether every coordinate (and multiplier) in the event is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match *self {
            Self::Down(p) | Self::Move(p) | Self::Up(p) | Self::LongPress(p) => p.is_finite(),
            Self::Pinch { focal, multiplier } => focal.is_finite() && multiplier.is_finite(),
        }
    }
}

/// The gesture currently being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next press.
    #[default]
    Idle,
    /// Pressed on empty chart; moves pan the view.
    Panning {
        /// Screen-space position of the previous event, used to compute the pan delta.
        last_screen: Point,
    },
    /// Moving the selected element.
    DraggingElement {
        /// The element being dragged.
        target: Selection,
        /// Chart-space position of the previous event.
        last_chart: Point,
    },
    /// Freehand vector mode. Armed until a drawn vector is committed.
    PlacingFreehand {
        /// Chart-space press point, once the finger is down.
        origin: Option<Point>,
        /// Chart-space end of the live preview, once the finger has moved.
        preview_end: Option<Point>,
    },
}

impl InputState {
    /// Whether freehand mode is armed, with or without a press in progress.
    #[must_use]
    pub fn is_freehand(&self) -> bool {
        matches!(self, Self::PlacingFreehand { .. })
    }

    /// The uncommitted freehand vector as `(start, end)`, if one is being drawn.
    #[must_use]
    pub fn freehand_preview(&self) -> Option<(Point, Point)> {
        match *self {
            Self::PlacingFreehand { origin: Some(start), preview_end: Some(end) } => Some((start, end)),
            _ => None,
        }
    }
}

/// A creation command waiting for the next release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingCreate {
    /// Lay off a vector from the release point.
    Vector {
        bearing_deg: f64,
        distance_nm: f64,
        kind: VectorKind,
    },
    /// Draw a range circle centered on the release point.
    Circle { distance_nm: f64 },
}

//! Annotation model: chart elements, their handles, and the in-memory store.
//!
//! Every element lives in chart-pixel space. The store keeps three
//! insertion-ordered collections (vectors, range circles, waypoints); order is
//! both draw order and hit-test priority, with the most recently added element
//! on top. At most one element is selected at a time, tracked by a tagged
//! [`Selection`] handle rather than a reference, so removing an element and
//! clearing its selection happen in one step.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::hit::{HitTolerances, point_segment_distance, ring_distance};

/// Unique identifier for a chart element. Never reused.
pub type ElementId = Uuid;

/// What a vector represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorKind {
    /// Course line laid off from a bearing and distance.
    Course,
    /// Bearing line to a charted object.
    Bearing,
    /// Vector drawn by hand between two touched points.
    Freehand,
}

/// A directed segment from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartVector {
    pub id: ElementId,
    pub start: Point,
    pub end: Point,
    pub kind: VectorKind,
}

/// A distance circle. The radius is fixed at creation; only the center moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeCircle {
    pub id: ElementId,
    pub center: Point,
    pub radius_px: f64,
}

/// A marked position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: ElementId,
    pub position: Point,
}

/// Handle to one element, tagged with the collection that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Selection {
    Vector(ElementId),
    Circle(ElementId),
    Waypoint(ElementId),
}

impl Selection {
    /// The id behind the handle.
    #[must_use]
    pub fn id(self) -> ElementId {
        match self {
            Self::Vector(id) | Self::Circle(id) | Self::Waypoint(id) => id,
        }
    }
}

/// In-memory store of chart annotations plus the selection slot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartElements {
    vectors: Vec<ChartVector>,
    circles: Vec<RangeCircle>,
    waypoints: Vec<Waypoint>,
    selection: Option<Selection>,
}

impl ChartElements {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Creation ---

    /// Append a vector and return its id.
    pub fn add_vector(&mut self, start: Point, end: Point, kind: VectorKind) -> ElementId {
        let id = Uuid::new_v4();
        self.vectors.push(ChartVector { id, start, end, kind });
        id
    }

    /// Append a circle and return its id. Negative radii are stored as zero.
    pub fn add_circle(&mut self, center: Point, radius_px: f64) -> ElementId {
        let id = Uuid::new_v4();
        self.circles.push(RangeCircle { id, center, radius_px: radius_px.max(0.0) });
        id
    }

    /// Append a waypoint and return its id.
    pub fn add_waypoint(&mut self, position: Point) -> ElementId {
        let id = Uuid::new_v4();
        self.waypoints.push(Waypoint { id, position });
        id
    }

    // --- Hit-testing ---

    /// Topmost vector whose segment lies within `tolerance` of `pt`.
    #[must_use]
    pub fn hit_test_vector(&self, pt: Point, tolerance: f64) -> Option<&ChartVector> {
        self.vectors
            .iter()
            .rev()
            .find(|v| point_segment_distance(pt, v.start, v.end) <= tolerance)
    }

    /// Topmost circle whose ring lies within `tolerance` of `pt`.
    #[must_use]
    pub fn hit_test_circle(&self, pt: Point, tolerance: f64) -> Option<&RangeCircle> {
        self.circles
            .iter()
            .rev()
            .find(|c| ring_distance(pt, c.center, c.radius_px) <= tolerance)
    }

    /// Topmost waypoint within `tolerance` of `pt`.
    #[must_use]
    pub fn hit_test_waypoint(&self, pt: Point, tolerance: f64) -> Option<&Waypoint> {
        self.waypoints
            .iter()
            .rev()
            .find(|w| pt.distance_to(w.position) <= tolerance)
    }

    /// Resolve a tap to at most one element.
    ///
    /// Circle rings win over vectors; waypoints are considered only when
    /// neither a circle nor a vector is hit.
    #[must_use]
    pub fn pick(&self, pt: Point, tolerances: &HitTolerances) -> Option<Selection> {
        if let Some(c) = self.hit_test_circle(pt, tolerances.circle_px) {
            return Some(Selection::Circle(c.id));
        }
        if let Some(v) = self.hit_test_vector(pt, tolerances.vector_px) {
            return Some(Selection::Vector(v.id));
        }
        self.hit_test_waypoint(pt, tolerances.waypoint_px)
            .map(|w| Selection::Waypoint(w.id))
    }

    // --- Selection ---

    /// Replace the selection with whatever [`ChartElements::pick`] finds at
    /// `pt` (possibly nothing).
    pub fn select_at(&mut self, pt: Point, tolerances: &HitTolerances) -> Option<Selection> {
        self.selection = self.pick(pt, tolerances);
        self.selection
    }

    /// Select an element by handle. Returns `false` (leaving the selection
    /// untouched) if the element does not exist.
    pub fn select(&mut self, selection: Selection) -> bool {
        if !self.contains(selection) {
            return false;
        }
        self.selection = Some(selection);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    #[must_use]
    pub fn is_selected(&self, selection: Selection) -> bool {
        self.selection == Some(selection)
    }

    // --- Mutation ---

    /// Move the selected element by a chart-space delta. A vector moves both
    /// endpoints, a circle its center, a waypoint its position.
    pub fn translate_selected(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        match self.selection {
            Some(Selection::Vector(id)) => {
                if let Some(v) = self.vectors.iter_mut().find(|v| v.id == id) {
                    v.start = v.start.offset(dx, dy);
                    v.end = v.end.offset(dx, dy);
                }
            }
            Some(Selection::Circle(id)) => {
                if let Some(c) = self.circles.iter_mut().find(|c| c.id == id) {
                    c.center = c.center.offset(dx, dy);
                }
            }
            Some(Selection::Waypoint(id)) => {
                if let Some(w) = self.waypoints.iter_mut().find(|w| w.id == id) {
                    w.position = w.position.offset(dx, dy);
                }
            }
            None => {}
        }
    }

    /// Remove the selected element and clear the selection. Returns the
    /// handle of what was removed.
    pub fn remove_selected(&mut self) -> Option<Selection> {
        let selection = self.selection.take()?;
        match selection {
            Selection::Vector(id) => self.vectors.retain(|v| v.id != id),
            Selection::Circle(id) => self.circles.retain(|c| c.id != id),
            Selection::Waypoint(id) => self.waypoints.retain(|w| w.id != id),
        }
        Some(selection)
    }

    // --- Queries ---

    /// Vectors in insertion (draw) order.
    #[must_use]
    pub fn vectors(&self) -> &[ChartVector] {
        &self.vectors
    }

    /// Circles in insertion (draw) order.
    #[must_use]
    pub fn circles(&self) -> &[RangeCircle] {
        &self.circles
    }

    /// Waypoints in insertion (draw) order.
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    #[must_use]
    pub fn vector(&self, id: &ElementId) -> Option<&ChartVector> {
        self.vectors.iter().find(|v| v.id == *id)
    }

    #[must_use]
    pub fn circle(&self, id: &ElementId) -> Option<&RangeCircle> {
        self.circles.iter().find(|c| c.id == *id)
    }

    #[must_use]
    pub fn waypoint(&self, id: &ElementId) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.id == *id)
    }

    /// Whether the element behind `selection` is present.
    #[must_use]
    pub fn contains(&self, selection: Selection) -> bool {
        match selection {
            Selection::Vector(id) => self.vector(&id).is_some(),
            Selection::Circle(id) => self.circle(&id).is_some(),
            Selection::Waypoint(id) => self.waypoint(&id).is_some(),
        }
    }

    /// Total number of elements across all collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len() + self.circles.len() + self.waypoints.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

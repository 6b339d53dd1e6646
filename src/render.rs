//! Rendering: builds a renderer-neutral draw list for the chart scene.
//!
//! This module turns the element store and a camera into a [`Scene`], a flat
//! list of primitives in output coordinates (screen pixels for the live view,
//! page points for export). The host replays it on whatever 2D surface it
//! owns. Nothing here mutates application state.
//!
//! Geometry, stroke widths, and radii are all laid out in chart pixels and
//! then mapped through the camera, so the drawing scales with zoom the same
//! way the chart bitmap does.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::{Camera, Point};
use crate::consts::{A3_LANDSCAPE, ARROW_HEAD_ANGLE_DEG, ARROW_HEAD_LENGTH_PX, WAYPOINT_DOT_RADIUS_PX};
use crate::doc::{ChartElements, ChartVector, RangeCircle, Selection, VectorKind, Waypoint};
use crate::engine::{ChartState, EngineCore};

const COURSE_COLOR: &str = "#0000FF";
const BEARING_COLOR: &str = "#FFA500";
const FREEHAND_COLOR: &str = "#A52A2A";
const SELECTED_COLOR: &str = "#FFFF00";
const CIRCLE_COLOR: &str = "#00FF00";
const WAYPOINT_COLOR: &str = "#FF0000";

const VECTOR_STROKE_PX: f64 = 5.0;
const VECTOR_SELECTED_STROKE_PX: f64 = 7.0;
const CIRCLE_STROKE_PX: f64 = 4.0;
const CIRCLE_SELECTED_STROKE_PX: f64 = 6.0;

/// Stroke color and width in output units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
}

/// One drawing instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    /// The chart bitmap, stretched to this rectangle.
    ChartImage { x: f64, y: f64, width: f64, height: f64 },
    Line { from: Point, to: Point, stroke: Stroke },
    /// An unfilled circle.
    Ring { center: Point, radius: f64, stroke: Stroke },
    /// A filled circle.
    Dot { center: Point, radius: f64, fill: &'static str },
}

/// Draw list for one frame or one exported page, bottom layer first.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

/// Scene for the live view. Empty until the chart is ready.
#[must_use]
pub fn live_scene(core: &EngineCore) -> Scene {
    let ChartState::Ready(view) = core.state() else {
        return Scene::default();
    };
    build(
        core.elements(),
        core.freehand_preview(),
        &view.camera,
        (view.projection.width(), view.projection.height()),
        (view.viewport_w, view.viewport_h),
    )
}

/// Scene for a fixed-size page, independent of the live camera.
///
/// The chart is fitted (largest scale that shows all of it) and centered on
/// the page. Returns `None` when a dimension is not a positive finite number.
#[must_use]
pub fn export_scene(
    elements: &ChartElements,
    preview: Option<(Point, Point)>,
    bitmap_w: f64,
    bitmap_h: f64,
    page_w: f64,
    page_h: f64,
) -> Option<Scene> {
    let camera = Camera::fit(bitmap_w, bitmap_h, page_w, page_h, f64::MAX)?;
    Some(build(elements, preview, &camera, (bitmap_w, bitmap_h), (page_w, page_h)))
}

/// [`export_scene`] onto an A3 landscape page.
#[must_use]
pub fn export_scene_a3(elements: &ChartElements, bitmap_w: f64, bitmap_h: f64) -> Option<Scene> {
    let (page_w, page_h) = A3_LANDSCAPE;
    export_scene(elements, None, bitmap_w, bitmap_h, page_w, page_h)
}

fn build(
    elements: &ChartElements,
    preview: Option<(Point, Point)>,
    camera: &Camera,
    bitmap: (f64, f64),
    output: (f64, f64),
) -> Scene {
    let mut painter = Painter { camera, primitives: Vec::new() };

    // Layer 1: chart bitmap.
    let origin = camera.chart_to_screen(Point::new(0.0, 0.0));
    painter.primitives.push(Primitive::ChartImage {
        x: origin.x,
        y: origin.y,
        width: bitmap.0 * camera.scale,
        height: bitmap.1 * camera.scale,
    });

    // Layer 2: range circles.
    for circle in elements.circles() {
        painter.circle(circle, elements.is_selected(Selection::Circle(circle.id)));
    }

    // Layer 3: vectors.
    for vector in elements.vectors() {
        painter.vector(vector, elements.is_selected(Selection::Vector(vector.id)));
    }

    // Layer 4: uncommitted freehand vector.
    if let Some((start, end)) = preview {
        painter.arrow(start, end, vector_stroke(VectorKind::Freehand, false));
    }

    // Layer 5: waypoints on top.
    for waypoint in elements.waypoints() {
        painter.waypoint(waypoint, elements.is_selected(Selection::Waypoint(waypoint.id)));
    }

    Scene { width: output.0, height: output.1, primitives: painter.primitives }
}

/// Stroke for a vector, in chart pixels.
#[must_use]
pub fn vector_stroke(kind: VectorKind, selected: bool) -> Stroke {
    if selected {
        return Stroke { color: SELECTED_COLOR, width: VECTOR_SELECTED_STROKE_PX };
    }
    let color = match kind {
        VectorKind::Course => COURSE_COLOR,
        VectorKind::Bearing => BEARING_COLOR,
        VectorKind::Freehand => FREEHAND_COLOR,
    };
    Stroke { color, width: VECTOR_STROKE_PX }
}

/// Stroke for a range circle, in chart pixels.
#[must_use]
pub fn circle_stroke(selected: bool) -> Stroke {
    if selected {
        Stroke { color: SELECTED_COLOR, width: CIRCLE_SELECTED_STROKE_PX }
    } else {
        Stroke { color: CIRCLE_COLOR, width: CIRCLE_STROKE_PX }
    }
}

/// Collects primitives, mapping chart-space geometry through the camera.
struct Painter<'a> {
    camera: &'a Camera,
    primitives: Vec<Primitive>,
}

impl Painter<'_> {
    fn scaled(&self, stroke: Stroke) -> Stroke {
        Stroke { color: stroke.color, width: stroke.width * self.camera.scale }
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.primitives.push(Primitive::Line {
            from: self.camera.chart_to_screen(from),
            to: self.camera.chart_to_screen(to),
            stroke: self.scaled(stroke),
        });
    }

    fn circle(&mut self, circle: &RangeCircle, selected: bool) {
        self.primitives.push(Primitive::Ring {
            center: self.camera.chart_to_screen(circle.center),
            radius: circle.radius_px * self.camera.scale,
            stroke: self.scaled(circle_stroke(selected)),
        });
    }

    fn vector(&mut self, vector: &ChartVector, selected: bool) {
        self.arrow(vector.start, vector.end, vector_stroke(vector.kind, selected));
    }

    /// Shaft plus a two-stroke arrowhead at `end`.
    fn arrow(&mut self, start: Point, end: Point, stroke: Stroke) {
        self.line(start, end, stroke);
        let angle = (end.y - start.y).atan2(end.x - start.x);
        let spread = ARROW_HEAD_ANGLE_DEG.to_radians();
        for barb in [angle - spread, angle + spread] {
            let tip = end.offset(-ARROW_HEAD_LENGTH_PX * barb.cos(), -ARROW_HEAD_LENGTH_PX * barb.sin());
            self.line(end, tip, stroke);
        }
    }

    fn waypoint(&mut self, waypoint: &Waypoint, selected: bool) {
        let fill = if selected { SELECTED_COLOR } else { WAYPOINT_COLOR };
        self.primitives.push(Primitive::Dot {
            center: self.camera.chart_to_screen(waypoint.position),
            radius: WAYPOINT_DOT_RADIUS_PX * self.camera.scale,
            fill,
        });
    }
}

//! Interaction controller: turns gestures and dialog commands into edits.
//!
//! [`EngineCore`] owns every piece of mutable state (the chart view, the
//! element store, the gesture being tracked, and any armed one-shot command).
//! Each handler runs synchronously and returns the [`Action`]s the host must
//! react to, usually just a redraw.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::camera::{Camera, Point};
use crate::config::ChartConfig;
use crate::doc::{ChartElements, ChartVector, ElementId, Selection, VectorKind};
use crate::geo::{CoordAxis, GeoPoint, LongitudeSign, Projection, format_dm};
use crate::input::{InputEvent, InputState, PendingCreate};

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    ElementCreated(Selection),
    ElementDeleted(Selection),
    SelectionChanged(Option<Selection>),
    ShowVectorInfo(VectorInfo),
    ShowPositionInfo(PositionInfo),
}

/// Geographic readout for a vector, shown on long-press.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VectorInfo {
    pub id: ElementId,
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub bearing_deg: f64,
    pub distance_nm: f64,
    pub longitude: LongitudeSign,
}

impl fmt::Display for VectorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis = CoordAxis::Longitude(self.longitude);
        writeln!(
            f,
            "Start: {}, {}",
            format_dm(self.start.lat, CoordAxis::Latitude),
            format_dm(self.start.lon, axis)
        )?;
        writeln!(
            f,
            "End: {}, {}",
            format_dm(self.end.lat, CoordAxis::Latitude),
            format_dm(self.end.lon, axis)
        )?;
        writeln!(f, "Bearing: {:.1}°", self.bearing_deg)?;
        write!(f, "Distance: {:.2} NM", self.distance_nm)
    }
}

/// Geographic readout for an arbitrary chart position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionInfo {
    pub position: GeoPoint,
    pub longitude: LongitudeSign,
}

impl fmt::Display for PositionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}",
            format_dm(self.position.lat, CoordAxis::Latitude),
            format_dm(self.position.lon, CoordAxis::Longitude(self.longitude))
        )
    }
}

/// Projection and camera, available once the chart bitmap is measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartView {
    pub projection: Projection,
    pub camera: Camera,
    pub viewport_w: f64,
    pub viewport_h: f64,
}

/// Whether the chart bitmap has been loaded and measured.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ChartState {
    #[default]
    Unready,
    Ready(ChartView),
}

/// Core engine state.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    config: ChartConfig,
    elements: ChartElements,
    state: ChartState,
    input: InputState,
    pending: Option<PendingCreate>,
    pinching: bool,
}

impl EngineCore {
    #[must_use]
    pub fn new(config: ChartConfig) -> Self {
        Self { config, ..Self::default() }
    }

    // --- Chart lifecycle ---

    /// The chart bitmap has been decoded: build the projection and fit the
    /// camera so the whole chart is visible and centered.
    pub fn on_chart_ready(&mut self, bitmap_w: f64, bitmap_h: f64, viewport_w: f64, viewport_h: f64) -> Vec<Action> {
        let projection = Projection::new(self.config.extent, bitmap_w, bitmap_h);
        let camera = Camera::fit(bitmap_w, bitmap_h, viewport_w, viewport_h, self.config.max_scale);
        let (Some(projection), Some(camera)) = (projection, camera) else {
            warn!(bitmap_w, bitmap_h, viewport_w, viewport_h, "chart dimensions unusable; staying unready");
            return Vec::new();
        };
        info!(bitmap_w, bitmap_h, viewport_w, viewport_h, scale = camera.scale, "chart ready");
        self.state = ChartState::Ready(ChartView { projection, camera, viewport_w, viewport_h });
        vec![Action::RenderNeeded]
    }

    /// The viewport was resized. Raises the scale if the chart would no
    /// longer fill the view.
    pub fn set_viewport(&mut self, viewport_w: f64, viewport_h: f64) -> Vec<Action> {
        let ChartState::Ready(view) = &mut self.state else {
            return Vec::new();
        };
        let (bitmap_w, bitmap_h) = (view.projection.width(), view.projection.height());
        if !view.camera.refit_viewport(bitmap_w, bitmap_h, viewport_w, viewport_h) {
            warn!(viewport_w, viewport_h, "ignoring unusable viewport size");
            return Vec::new();
        }
        view.viewport_w = viewport_w;
        view.viewport_h = viewport_h;
        debug!(viewport_w, viewport_h, scale = view.camera.scale, "viewport resized");
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    /// Dispatch a normalized input event.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::Down(pt) => self.on_pointer_down(pt),
            InputEvent::Move(pt) => self.on_pointer_move(pt),
            InputEvent::Up(pt) => self.on_pointer_up(pt),
            InputEvent::Pinch { focal, multiplier } => self.on_pinch(focal, multiplier),
            InputEvent::LongPress(pt) => self.on_long_press(pt),
        }
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        if !screen_pt.is_finite() {
            warn!(?screen_pt, "ignoring non-finite pointer down");
            return Vec::new();
        }
        let Some(view) = self.view() else {
            warn!("pointer down before chart ready");
            return Vec::new();
        };
        self.pinching = false;
        let chart_pt = view.camera.screen_to_chart(screen_pt);

        if self.input.is_freehand() {
            self.input = InputState::PlacingFreehand { origin: Some(chart_pt), preview_end: None };
            return vec![Action::RenderNeeded];
        }

        let previous = self.elements.selection();
        let selection = self.elements.select_at(chart_pt, &self.config.tolerances);
        self.input = match selection {
            Some(target) => InputState::DraggingElement { target, last_chart: chart_pt },
            None => InputState::Panning { last_screen: screen_pt },
        };

        let mut actions = Vec::new();
        if selection != previous {
            debug!(?selection, "selection changed");
            actions.push(Action::SelectionChanged(selection));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if !screen_pt.is_finite() {
            warn!(?screen_pt, "ignoring non-finite pointer move");
            return Vec::new();
        }
        let Some(view) = self.view() else {
            return Vec::new();
        };
        let chart_pt = view.camera.screen_to_chart(screen_pt);

        let input = self.input;
        match input {
            InputState::PlacingFreehand { origin: Some(origin), .. } => {
                if self.pinching {
                    return Vec::new();
                }
                self.input = InputState::PlacingFreehand { origin: Some(origin), preview_end: Some(chart_pt) };
                vec![Action::RenderNeeded]
            }
            InputState::DraggingElement { target, last_chart } => {
                self.input = InputState::DraggingElement { target, last_chart: chart_pt };
                if self.pinching {
                    return Vec::new();
                }
                self.elements.translate_selected(chart_pt.x - last_chart.x, chart_pt.y - last_chart.y);
                vec![Action::RenderNeeded]
            }
            InputState::Panning { last_screen } => {
                self.input = InputState::Panning { last_screen: screen_pt };
                if self.pinching {
                    return Vec::new();
                }
                let (dx, dy) = (screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                if let ChartState::Ready(view) = &mut self.state {
                    view.camera.pan(dx, dy);
                    trace!(dx, dy, tx = view.camera.translate_x, ty = view.camera.translate_y, "pan");
                }
                vec![Action::RenderNeeded]
            }
            InputState::PlacingFreehand { origin: None, .. } | InputState::Idle => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        if !screen_pt.is_finite() {
            warn!(?screen_pt, "ignoring non-finite pointer up");
            return Vec::new();
        }
        let Some(view) = self.view() else {
            return Vec::new();
        };
        self.pinching = false;
        let chart_pt = view.camera.screen_to_chart(screen_pt);

        let input = self.input;
        match input {
            InputState::PlacingFreehand { origin: Some(start), preview_end: Some(end) } => {
                self.input = InputState::Idle;
                let id = self.elements.add_vector(start, end, VectorKind::Freehand);
                debug!(%id, "freehand vector created");
                vec![Action::ElementCreated(Selection::Vector(id)), Action::RenderNeeded]
            }
            InputState::PlacingFreehand { .. } => {
                self.input = InputState::PlacingFreehand { origin: None, preview_end: None };
                Vec::new()
            }
            _ => {
                self.input = InputState::Idle;
                match self.pending.take() {
                    Some(pending) => self.create_pending(pending, &view.projection, chart_pt),
                    None => Vec::new(),
                }
            }
        }
    }

    /// One pinch step. Suspends panning and dragging until the next press or release.
    pub fn on_pinch(&mut self, focal: Point, multiplier: f64) -> Vec<Action> {
        if !focal.is_finite() || !multiplier.is_finite() {
            warn!(?focal, multiplier, "ignoring non-finite pinch");
            return Vec::new();
        }
        let ChartState::Ready(view) = &mut self.state else {
            return Vec::new();
        };
        self.pinching = true;
        view.camera.zoom_at(focal, multiplier);
        trace!(multiplier, scale = view.camera.scale, "zoom");
        vec![Action::RenderNeeded]
    }

    /// Show the geographic readout under the finger. Read-only.
    pub fn on_long_press(&self, screen_pt: Point) -> Vec<Action> {
        if !screen_pt.is_finite() {
            warn!(?screen_pt, "ignoring non-finite long press");
            return Vec::new();
        }
        let Some(view) = self.view() else {
            return Vec::new();
        };
        let chart_pt = view.camera.screen_to_chart(screen_pt);
        let hit = self.elements.hit_test_vector(chart_pt, self.config.tolerances.vector_px);
        match hit {
            Some(vector) => vec![Action::ShowVectorInfo(describe_vector(vector, &view.projection))],
            None => vec![Action::ShowPositionInfo(describe_position(chart_pt, &view.projection))],
        }
    }

    // --- Commands ---

    /// Arm a one-shot vector laid off from the next release point.
    ///
    /// Replaces any armed command and leaves freehand mode. Returns `false`
    /// if an argument is not finite.
    pub fn prepare_vector(&mut self, bearing_deg: f64, distance_nm: f64, kind: VectorKind) -> bool {
        if !bearing_deg.is_finite() || !distance_nm.is_finite() {
            warn!(bearing_deg, distance_nm, "ignoring non-finite vector command");
            return false;
        }
        self.arm(PendingCreate::Vector { bearing_deg, distance_nm, kind });
        true
    }

    /// Arm a one-shot range circle centered on the next release point.
    pub fn prepare_circle(&mut self, distance_nm: f64) -> bool {
        if !distance_nm.is_finite() {
            warn!(distance_nm, "ignoring non-finite circle command");
            return false;
        }
        self.arm(PendingCreate::Circle { distance_nm });
        true
    }

    /// Enter freehand mode. Clears the selection, any armed command, and any
    /// stale preview.
    pub fn activate_freehand_vector(&mut self) -> Vec<Action> {
        self.pending = None;
        self.input = InputState::PlacingFreehand { origin: None, preview_end: None };
        let mut actions = Vec::new();
        if self.elements.selection().is_some() {
            self.elements.clear_selection();
            actions.push(Action::SelectionChanged(None));
        }
        debug!("freehand mode armed");
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove the selected element. No-op without a selection.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let Some(removed) = self.elements.remove_selected() else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        debug!(?removed, "element deleted");
        vec![
            Action::ElementDeleted(removed),
            Action::SelectionChanged(None),
            Action::RenderNeeded,
        ]
    }

    /// Drop a waypoint at a typed-in position.
    pub fn create_waypoint_at(&mut self, lat: f64, lon: f64) -> Vec<Action> {
        if !lat.is_finite() || !lon.is_finite() {
            warn!(lat, lon, "ignoring non-finite waypoint position");
            return Vec::new();
        }
        let Some(view) = self.view() else {
            warn!(lat, lon, "waypoint requested before chart ready");
            return Vec::new();
        };
        let position = view.projection.to_pixel(GeoPoint::new(lat, lon));
        let id = self.elements.add_waypoint(position);
        debug!(%id, lat, lon, "waypoint created");
        vec![Action::ElementCreated(Selection::Waypoint(id)), Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn elements(&self) -> &ChartElements {
        &self.elements
    }

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.elements.selection()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, ChartState::Ready(_))
    }

    #[must_use]
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    /// The live camera, once the chart is ready.
    #[must_use]
    pub fn camera(&self) -> Option<Camera> {
        self.view().map(|v| v.camera)
    }

    #[must_use]
    pub fn projection(&self) -> Option<&Projection> {
        match &self.state {
            ChartState::Ready(view) => Some(&view.projection),
            ChartState::Unready => None,
        }
    }

    #[must_use]
    pub fn input(&self) -> InputState {
        self.input
    }

    /// The armed one-shot command, if any.
    #[must_use]
    pub fn pending(&self) -> Option<PendingCreate> {
        self.pending
    }

    /// The uncommitted freehand vector in chart space.
    #[must_use]
    pub fn freehand_preview(&self) -> Option<(Point, Point)> {
        self.input.freehand_preview()
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinching
    }

    /// Geographic readout for a vector by id.
    #[must_use]
    pub fn vector_info(&self, id: &ElementId) -> Option<VectorInfo> {
        let view = self.view()?;
        let vector = self.elements.vector(id)?;
        Some(describe_vector(vector, &view.projection))
    }

    /// Geographic readout for a screen position.
    #[must_use]
    pub fn position_at(&self, screen_pt: Point) -> Option<PositionInfo> {
        if !screen_pt.is_finite() {
            return None;
        }
        let view = self.view()?;
        Some(describe_position(view.camera.screen_to_chart(screen_pt), &view.projection))
    }

    // --- Internal ---

    fn view(&self) -> Option<ChartView> {
        match self.state {
            ChartState::Ready(view) => Some(view),
            ChartState::Unready => None,
        }
    }

    fn arm(&mut self, pending: PendingCreate) {
        if self.input.is_freehand() {
            self.input = InputState::Idle;
        }
        debug!(?pending, "creation armed");
        self.pending = Some(pending);
    }

    fn create_pending(&mut self, pending: PendingCreate, projection: &Projection, at: Point) -> Vec<Action> {
        let created = match pending {
            PendingCreate::Vector { bearing_deg, distance_nm, kind } => {
                let end = projection.destination_pixel(at, bearing_deg, distance_nm);
                Selection::Vector(self.elements.add_vector(at, end, kind))
            }
            PendingCreate::Circle { distance_nm } => {
                let radius_px = projection.radius_px_for(at, distance_nm);
                Selection::Circle(self.elements.add_circle(at, radius_px))
            }
        };
        debug!(?created, "element created");
        vec![Action::ElementCreated(created), Action::RenderNeeded]
    }
}

fn describe_vector(vector: &ChartVector, projection: &Projection) -> VectorInfo {
    VectorInfo {
        id: vector.id,
        start: projection.to_geographic(vector.start),
        end: projection.to_geographic(vector.end),
        bearing_deg: projection.pixel_bearing_deg(vector.start, vector.end),
        distance_nm: projection.pixel_distance_nm(vector.start, vector.end),
        longitude: projection.extent().longitude,
    }
}

fn describe_position(chart_pt: Point, projection: &Projection) -> PositionInfo {
    PositionInfo {
        position: projection.to_geographic(chart_pt),
        longitude: projection.extent().longitude,
    }
}

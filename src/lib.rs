//! Nautical chart annotation core.
//!
//! This crate owns everything behind a pan/zoom chart view that does not
//! depend on a UI toolkit: the screen ↔ chart-pixel transform, the
//! lat/lon ↔ chart-pixel projection, the annotation store (course vectors,
//! bearing lines, range circles, waypoints) with hit-testing and selection,
//! and the gesture state machine that turns normalized input events into
//! mutations. The host layer decodes the chart image, forwards input events,
//! collects dialog values, and draws the [`render::Scene`] it gets back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction controller ([`engine::EngineCore`]) and the [`engine::Action`]s it emits |
//! | [`doc`] | Annotation store, element types, and the single selection slot |
//! | [`camera`] | Scale + translation between screen and chart-pixel space |
//! | [`geo`] | Chart extent, lat/lon projection, bearing, distance, DM formatting |
//! | [`input`] | Input event types, gesture states, and one-shot commands |
//! | [`hit`] | Distance primitives and hit tolerances |
//! | [`render`] | Renderer-neutral draw lists for the live view and for export |
//! | [`config`] | Chart configuration from defaults, environment, or JSON |
//! | [`consts`] | Shared numeric constants (scale limit, tolerances, arrowheads) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geo;
pub mod hit;
pub mod input;
pub mod render;

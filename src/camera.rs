#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or chart-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// This point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point { x: self.x + dx, y: self.y + dy }
    }

    /// Both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// View transform between chart-pixel space and screen space.
///
/// `screen = chart * scale + translate`. There is no rotation, so the inverse
/// is algebraic. `scale` always stays within `[min_scale, max_scale]`, where
/// `min_scale` is the scale at which the whole chart bitmap fits the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    min_scale: f64,
    max_scale: f64,
}

impl Camera {
    /// Fit a `bitmap_w × bitmap_h` chart inside a `viewport_w × viewport_h`
    /// viewport, centered, at the largest scale that shows all of it.
    ///
    /// Returns `None` when any dimension is not a positive finite number.
    #[must_use]
    pub fn fit(bitmap_w: f64, bitmap_h: f64, viewport_w: f64, viewport_h: f64, max_scale: f64) -> Option<Self> {
        let min_scale = fit_scale(bitmap_w, bitmap_h, viewport_w, viewport_h)?;
        Some(Self {
            scale: min_scale,
            translate_x: (viewport_w - bitmap_w * min_scale) / 2.0,
            translate_y: (viewport_h - bitmap_h * min_scale) / 2.0,
            min_scale,
            max_scale: max_scale.max(min_scale),
        })
    }

    /// Smallest allowed scale (chart fits the viewport).
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Largest allowed scale.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Convert a screen-space point to chart-pixel coordinates.
    #[must_use]
    pub fn screen_to_chart(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.translate_x) / self.scale,
            y: (screen.y - self.translate_y) / self.scale,
        }
    }

    /// Convert a chart-pixel point to screen coordinates.
    #[must_use]
    pub fn chart_to_screen(&self, chart: Point) -> Point {
        Point {
            x: chart.x * self.scale + self.translate_x,
            y: chart.y * self.scale + self.translate_y,
        }
    }

    /// Convert a screen-space distance (pixels) to a chart-space distance.
    #[must_use]
    pub fn screen_dist_to_chart(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Multiply the scale by `multiplier`, clamped to the allowed range, while
    /// keeping the chart point under `focal` fixed on screen.
    ///
    /// Non-finite or non-positive multipliers are ignored.
    pub fn zoom_at(&mut self, focal: Point, multiplier: f64) {
        if !multiplier.is_finite() || multiplier <= 0.0 || !focal.is_finite() {
            return;
        }
        let new_scale = (self.scale * multiplier).clamp(self.min_scale, self.max_scale);
        let ratio = new_scale / self.scale;
        self.translate_x = focal.x - (focal.x - self.translate_x) * ratio;
        self.translate_y = focal.y - (focal.y - self.translate_y) * ratio;
        self.scale = new_scale;
    }

    /// Shift the chart by a screen-space delta. No bounds are applied.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.translate_x += dx;
        self.translate_y += dy;
    }

    /// Recompute the minimum scale after a viewport resize.
    ///
    /// If the current scale falls below the new minimum it is raised to it,
    /// anchored at the new viewport center. Returns `false` (and changes
    /// nothing) when the dimensions are unusable.
    pub fn refit_viewport(&mut self, bitmap_w: f64, bitmap_h: f64, viewport_w: f64, viewport_h: f64) -> bool {
        let Some(min_scale) = fit_scale(bitmap_w, bitmap_h, viewport_w, viewport_h) else {
            return false;
        };
        self.min_scale = min_scale;
        self.max_scale = self.max_scale.max(min_scale);
        if self.scale < min_scale {
            let center = Point::new(viewport_w / 2.0, viewport_h / 2.0);
            self.zoom_at(center, min_scale / self.scale);
        }
        true
    }
}

fn fit_scale(bitmap_w: f64, bitmap_h: f64, viewport_w: f64, viewport_h: f64) -> Option<f64> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !(usable(bitmap_w) && usable(bitmap_h) && usable(viewport_w) && usable(viewport_h)) {
        return None;
    }
    Some((viewport_w / bitmap_w).min(viewport_h / bitmap_h))
}

//! Geographic projection and dead-reckoning math.
//!
//! The chart is a raster covering a small, fixed lat/lon box. Positions map
//! linearly onto chart pixels (equirectangular), which is only meaningful
//! inside that box. Distances use a flat-earth approximation with the
//! longitude axis compressed by `cos(mean latitude)`; one minute of latitude
//! is one nautical mile.
//!
//! Longitudes are stored in whichever sign convention the chart uses
//! ([`LongitudeSign`]). East is always to the right on the chart; the
//! convention only decides whether larger stored values lie east or west.

#[cfg(test)]
#[path = "geo_test.rs"]
mod geo_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::config::ConfigError;
use crate::consts::{CIRCLE_CALIBRATION_PX, MINUTES_PER_DEGREE};

/// A latitude/longitude position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Sign convention for stored longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LongitudeSign {
    /// Positive values are degrees west of Greenwich.
    #[default]
    West,
    /// Positive values are degrees east of Greenwich.
    East,
}

impl LongitudeSign {
    /// Convert a stored longitude to positive-east degrees.
    #[must_use]
    pub fn to_east(self, lon: f64) -> f64 {
        match self {
            Self::West => -lon,
            Self::East => lon,
        }
    }

    /// Parse `"west"` / `"east"` (case-insensitive).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "west" | "w" => Some(Self::West),
            "east" | "e" => Some(Self::East),
            _ => None,
        }
    }
}

/// The lat/lon box covered by the chart bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartExtent {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    #[serde(default)]
    pub longitude: LongitudeSign,
}

impl ChartExtent {
    /// Build a validated extent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidExtent`] if a bound is not finite or a
    /// minimum is not strictly below its maximum.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64, longitude: LongitudeSign) -> Result<Self, ConfigError> {
        let extent = Self { lat_min, lat_max, lon_min, lon_max, longitude };
        extent.validate()?;
        Ok(extent)
    }

    /// Check bounds are finite and ordered.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidExtent`] describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = [self.lat_min, self.lat_max, self.lon_min, self.lon_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(ConfigError::InvalidExtent("bounds must be finite".into()));
        }
        if self.lat_min >= self.lat_max {
            return Err(ConfigError::InvalidExtent(format!(
                "lat_min {} must be below lat_max {}",
                self.lat_min, self.lat_max
            )));
        }
        if self.lon_min >= self.lon_max {
            return Err(ConfigError::InvalidExtent(format!(
                "lon_min {} must be below lon_max {}",
                self.lon_min, self.lon_max
            )));
        }
        Ok(())
    }

    /// Latitude span in degrees.
    #[must_use]
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Longitude span in degrees.
    #[must_use]
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Geographic center of the box.
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new((self.lat_min + self.lat_max) / 2.0, (self.lon_min + self.lon_max) / 2.0)
    }

    /// Whether `p` lies inside the box (inclusive).
    #[must_use]
    pub fn contains(&self, p: GeoPoint) -> bool {
        (self.lat_min..=self.lat_max).contains(&p.lat) && (self.lon_min..=self.lon_max).contains(&p.lon)
    }
}

/// Mapping between geographic positions and chart-bitmap pixels.
///
/// Only constructible once the bitmap dimensions are known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    extent: ChartExtent,
    width: f64,
    height: f64,
}

impl Projection {
    /// Returns `None` unless both dimensions are positive and finite.
    #[must_use]
    pub fn new(extent: ChartExtent, width: f64, height: f64) -> Option<Self> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            return None;
        }
        Some(Self { extent, width, height })
    }

    #[must_use]
    pub fn extent(&self) -> &ChartExtent {
        &self.extent
    }

    /// Bitmap width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Bitmap height in pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Project a position onto chart pixels.
    #[must_use]
    pub fn to_pixel(&self, p: GeoPoint) -> Point {
        let e = &self.extent;
        let lon_fraction = match e.longitude {
            LongitudeSign::West => (e.lon_max - p.lon) / e.lon_span(),
            LongitudeSign::East => (p.lon - e.lon_min) / e.lon_span(),
        };
        Point {
            x: lon_fraction * self.width,
            y: (e.lat_max - p.lat) / e.lat_span() * self.height,
        }
    }

    /// Inverse of [`Projection::to_pixel`].
    #[must_use]
    pub fn to_geographic(&self, p: Point) -> GeoPoint {
        let e = &self.extent;
        let lon_offset = p.x / self.width * e.lon_span();
        let lon = match e.longitude {
            LongitudeSign::West => e.lon_max - lon_offset,
            LongitudeSign::East => e.lon_min + lon_offset,
        };
        GeoPoint {
            lat: e.lat_max - p.y / self.height * e.lat_span(),
            lon,
        }
    }

    /// Bearing from `a` to `b` in degrees, `[0, 360)`, honoring the chart's
    /// longitude convention.
    #[must_use]
    pub fn bearing_deg(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        let sign = self.extent.longitude;
        initial_bearing_deg(
            GeoPoint::new(a.lat, sign.to_east(a.lon)),
            GeoPoint::new(b.lat, sign.to_east(b.lon)),
        )
    }

    /// Bearing between two chart pixels.
    #[must_use]
    pub fn pixel_bearing_deg(&self, a: Point, b: Point) -> f64 {
        self.bearing_deg(self.to_geographic(a), self.to_geographic(b))
    }

    /// Distance in nautical miles between two chart pixels.
    #[must_use]
    pub fn pixel_distance_nm(&self, a: Point, b: Point) -> f64 {
        distance_nm(self.to_geographic(a), self.to_geographic(b))
    }

    /// End pixel of a run of `distance_nm` from `start` on `bearing_deg`.
    ///
    /// The direction is taken in pixel space (0° up, 90° right). The length is
    /// calibrated by measuring a one-pixel step along that ray, which absorbs
    /// the longitude compression without a closed-form pixels-per-mile.
    #[must_use]
    pub fn destination_pixel(&self, start: Point, bearing_deg: f64, distance_nm: f64) -> Point {
        if !distance_nm.is_finite() || !bearing_deg.is_finite() {
            return start;
        }
        let angle = (bearing_deg - 90.0).to_radians();
        let (dy, dx) = angle.sin_cos();
        let measured = self.pixel_distance_nm(start, start.offset(dx, dy));
        if !measured.is_finite() || measured <= 0.0 {
            return start;
        }
        let factor = distance_nm / measured;
        start.offset(dx * factor, dy * factor)
    }

    /// Position reached from `origin` after `distance_nm` on `bearing_deg`.
    #[must_use]
    pub fn destination(&self, origin: GeoPoint, bearing_deg: f64, distance_nm: f64) -> GeoPoint {
        self.to_geographic(self.destination_pixel(self.to_pixel(origin), bearing_deg, distance_nm))
    }

    /// Chart-pixel radius of a circle of `distance_nm` around `center`.
    ///
    /// Calibrated along an eastward step from `center`. Negative distances
    /// yield a zero radius.
    #[must_use]
    pub fn radius_px_for(&self, center: Point, distance_nm: f64) -> f64 {
        if !distance_nm.is_finite() || distance_nm <= 0.0 {
            return 0.0;
        }
        let reference = center.offset(CIRCLE_CALIBRATION_PX, 0.0);
        let measured = self.pixel_distance_nm(center, reference);
        if !measured.is_finite() || measured <= 0.0 {
            return 0.0;
        }
        distance_nm / measured * CIRCLE_CALIBRATION_PX
    }

    /// Format a position as `(latitude, longitude)` degree-minute strings.
    #[must_use]
    pub fn format_position(&self, p: GeoPoint) -> (String, String) {
        (
            format_dm(p.lat, CoordAxis::Latitude),
            format_dm(p.lon, CoordAxis::Longitude(self.extent.longitude)),
        )
    }
}

/// Initial great-circle bearing from `a` to `b`, positive-east longitudes,
/// normalized into `[0, 360)`.
///
/// Used as the rhumb bearing over the chart's short ranges; the two differ
/// negligibly at this scale.
#[must_use]
pub fn initial_bearing_deg(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_lambda = (b.lon - a.lon).to_radians();
    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Flat-earth distance in nautical miles. Independent of longitude sign.
#[must_use]
pub fn distance_nm(a: GeoPoint, b: GeoPoint) -> f64 {
    let mean_lat = ((a.lat + b.lat) / 2.0).to_radians();
    let d_lat = (b.lat - a.lat) * MINUTES_PER_DEGREE;
    let d_lon = (b.lon - a.lon) * MINUTES_PER_DEGREE * mean_lat.cos();
    d_lat.hypot(d_lon)
}

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid of a tiny negative rounds up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Which coordinate a value is, for hemisphere lettering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordAxis {
    Latitude,
    Longitude(LongitudeSign),
}

/// Render `value` as `"D° M.M' H"`.
///
/// Minutes are rounded to one decimal; a result that rounds to 60.0 carries
/// into the degrees.
#[must_use]
pub fn format_dm(value: f64, axis: CoordAxis) -> String {
    let abs = value.abs();
    let mut degrees = abs.trunc();
    let mut minutes = ((abs - degrees) * MINUTES_PER_DEGREE * 10.0).round() / 10.0;
    if minutes >= MINUTES_PER_DEGREE {
        minutes = 0.0;
        degrees += 1.0;
    }
    let positive = value >= 0.0;
    let hemisphere = match axis {
        CoordAxis::Latitude => {
            if positive {
                'N'
            } else {
                'S'
            }
        }
        CoordAxis::Longitude(LongitudeSign::West) => {
            if positive {
                'W'
            } else {
                'E'
            }
        }
        CoordAxis::Longitude(LongitudeSign::East) => {
            if positive {
                'E'
            } else {
                'W'
            }
        }
    };
    format!("{degrees:.0}° {minutes:.1}' {hemisphere}")
}

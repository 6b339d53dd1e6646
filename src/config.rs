//! Chart configuration: extent, scale limit, and hit tolerances.
//!
//! A chart ships with metadata describing the lat/lon box its bitmap covers.
//! The host either passes that metadata as JSON ([`ChartConfig::from_json`])
//! or sets `CARTA_*` environment variables ([`ChartConfig::from_env`]).
//! Anything left unspecified falls back to the bundled reference chart.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SCALE;
use crate::geo::{ChartExtent, LongitudeSign};
use crate::hit::HitTolerances;

/// Reference chart: Strait of Gibraltar, longitudes stored positive-west.
pub const REFERENCE_EXTENT: ChartExtent = ChartExtent {
    lat_min: 35.663_366_666_666_67,
    lat_max: 36.336_633_333_333_33,
    lon_min: 5.163_366_666_666_667,
    lon_max: 6.336_633_333_333_333,
    longitude: LongitudeSign::West,
};

/// Errors produced while building a [`ChartConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A value could not be parsed as the expected type.
    #[error("config parse failed: {key}={value}")]
    Parse { key: String, value: String },

    /// The chart extent is unusable.
    #[error("invalid chart extent: {0}")]
    InvalidExtent(String),

    /// A numeric setting is out of range.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// An environment variable holds non-UTF-8 data.
    #[error("env var {0} is not valid unicode")]
    NotUnicode(String),

    /// Chart metadata JSON is malformed.
    #[error("chart metadata parse failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the core needs to know about the loaded chart besides its
/// bitmap dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub extent: ChartExtent,
    pub max_scale: f64,
    pub tolerances: HitTolerances,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            extent: REFERENCE_EXTENT,
            max_scale: MAX_SCALE,
            tolerances: HitTolerances::default(),
        }
    }
}

impl ChartConfig {
    /// Build config from environment variables.
    ///
    /// All optional; defaults come from [`ChartConfig::default`]:
    /// - `CARTA_LAT_MIN`, `CARTA_LAT_MAX`, `CARTA_LON_MIN`, `CARTA_LON_MAX`
    /// - `CARTA_LONGITUDE`: `west` (default) or `east`
    /// - `CARTA_MAX_SCALE`: default 5.0
    /// - `CARTA_VECTOR_TOLERANCE_PX`, `CARTA_CIRCLE_TOLERANCE_PX`,
    ///   `CARTA_WAYPOINT_TOLERANCE_PX`: default 30 / 25 / 30
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is unparseable or the result
    /// fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key.to_string())),
        })
    }

    /// Build config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    ///
    /// # Errors
    ///
    /// See [`ChartConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let defaults = Self::default();
        let longitude = match lookup("CARTA_LONGITUDE")? {
            Some(raw) => LongitudeSign::parse(&raw).ok_or(ConfigError::Parse { key: "CARTA_LONGITUDE".into(), value: raw })?,
            None => defaults.extent.longitude,
        };
        let extent = ChartExtent {
            lat_min: parse_f64(&lookup, "CARTA_LAT_MIN", defaults.extent.lat_min)?,
            lat_max: parse_f64(&lookup, "CARTA_LAT_MAX", defaults.extent.lat_max)?,
            lon_min: parse_f64(&lookup, "CARTA_LON_MIN", defaults.extent.lon_min)?,
            lon_max: parse_f64(&lookup, "CARTA_LON_MAX", defaults.extent.lon_max)?,
            longitude,
        };
        let tolerances = HitTolerances {
            vector_px: parse_f64(&lookup, "CARTA_VECTOR_TOLERANCE_PX", defaults.tolerances.vector_px)?,
            circle_px: parse_f64(&lookup, "CARTA_CIRCLE_TOLERANCE_PX", defaults.tolerances.circle_px)?,
            waypoint_px: parse_f64(&lookup, "CARTA_WAYPOINT_TOLERANCE_PX", defaults.tolerances.waypoint_px)?,
        };
        let max_scale = parse_f64(&lookup, "CARTA_MAX_SCALE", defaults.max_scale)?;

        let config = Self { extent, max_scale, tolerances };
        config.validate()?;
        Ok(config)
    }

    /// Parse chart metadata JSON. Missing fields take their defaults.
    ///
    /// ```json
    /// { "extent": { "lat_min": 35.0, "lat_max": 36.0, "lon_min": 5.0, "lon_max": 6.0, "longitude": "east" } }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input, or a validation error.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the extent, scale limit, and tolerances.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extent.validate()?;
        if !self.max_scale.is_finite() || self.max_scale <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "max_scale".into(),
                reason: format!("{} is not a positive number", self.max_scale),
            });
        }
        let tolerances = [
            ("vector_px", self.tolerances.vector_px),
            ("circle_px", self.tolerances.circle_px),
            ("waypoint_px", self.tolerances.waypoint_px),
        ];
        for (key, value) in tolerances {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    reason: format!("{value} is not a non-negative number"),
                });
            }
        }
        Ok(())
    }
}

fn parse_f64<F>(lookup: &F, key: &str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Result<Option<String>, ConfigError>,
{
    match lookup(key)? {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::Parse { key: key.into(), value: raw }),
        None => Ok(default),
    }
}

//! Configuration schema definitions

use crate::error::{Error, Result};
use crate::map::{CoverageRing, ViewSettings};
use crate::nearest::NearestScope;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Highest zoom level common tile servers provide.
pub const MAX_ZOOM: u8 = 19;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    #[serde(default)]
    pub map: ViewSettings,

    #[serde(default)]
    pub coverage: CoverageConfig,

    #[serde(default)]
    pub nearest: NearestConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Checks values serde cannot express constraints for.
    pub fn validate(&self) -> Result<()> {
        for (name, zoom) in [
            ("map.initial_zoom", self.map.initial_zoom),
            ("map.user_zoom", self.map.user_zoom),
            ("map.focus_zoom", self.map.focus_zoom),
        ] {
            if zoom > MAX_ZOOM {
                return Err(Error::Config(format!("{name} must be at most {MAX_ZOOM}, got {zoom}")));
            }
        }

        for ring in &self.coverage.rings {
            if !ring.radius_km.is_finite() || ring.radius_km <= 0.0 {
                return Err(Error::Config(format!(
                    "coverage ring radius must be positive, got {}",
                    ring.radius_km
                )));
            }
            if !(0.0..=1.0).contains(&ring.fill_opacity) {
                return Err(Error::Config(format!(
                    "coverage ring fill_opacity must be within 0..=1, got {}",
                    ring.fill_opacity
                )));
            }
        }

        Ok(())
    }
}

/// Coverage rings drawn around each station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageConfig {
    #[serde(default = "CoverageRing::defaults")]
    pub rings: Vec<CoverageRing>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self { rings: CoverageRing::defaults() }
    }
}

/// Nearest-station lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NearestConfig {
    /// Search all stations or only visible ones
    #[serde(default)]
    pub scope: NearestScope,
}

/// Station table source
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RegistryConfig {
    /// TOML station table replacing the embedded one
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

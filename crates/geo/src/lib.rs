//! Geospatial math for ambumap.
//!
//! This crate provides:
//! - A validated latitude/longitude [`Coordinate`]
//! - Haversine great-circle distance in kilometers
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use ambumap_geo::{distance_km, Coordinate};
//!
//! let arnedo = Coordinate::new(42.2251, -2.1042);
//! let haro = Coordinate::new(42.5766, -2.8490);
//!
//! let km = distance_km(&arnedo, &haro);
//! assert!((km - 72.58).abs() < 0.1);
//! ```

mod error;
mod haversine;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{EARTH_RADIUS_KM, distance_km};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate without validating it.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate { latitude, longitude })
        }
    }

    /// Returns true if both components are finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

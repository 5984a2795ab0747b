//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// The result is symmetric, never negative, and exactly zero for identical
/// coordinates. Poles and antipodal points are handled without domain errors.
///
/// # Example
/// ```
/// use ambumap_geo::{distance_km, Coordinate};
///
/// let logrono = Coordinate::new(42.4631, -2.4520);
/// assert_eq!(distance_km(&logrono, &logrono), 0.0);
/// ```
#[inline]
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] near antipodes.
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

//! WASM bindings for the geo crate.
//!
//! These bindings allow distance calculations from JavaScript/TypeScript
//! in browser environments.

use crate::{distance_km, Coordinate};
use wasm_bindgen::prelude::*;

/// Calculate distance between two coordinates.
///
/// # Arguments
/// * `lat1` - Latitude of first point
/// * `lng1` - Longitude of first point
/// * `lat2` - Latitude of second point
/// * `lng2` - Longitude of second point
///
/// # Returns
/// Distance in kilometers
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let from = Coordinate::new(lat1, lng1);
    let to = Coordinate::new(lat2, lng2);
    distance_km(&from, &to)
}

/// Returns true if the pair is a usable latitude/longitude.
#[wasm_bindgen]
pub fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    Coordinate::new(lat, lng).is_valid()
}

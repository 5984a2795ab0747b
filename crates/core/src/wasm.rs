//! WASM bindings for the core crate.
//!
//! These expose the embedded La Rioja table to a browser map shell. Station
//! ids cross the boundary as plain `u32` indices.

use crate::filter::{visible_stations, FilterFlags, VisibilityOverrides};
use crate::map::{CoverageRing, RenderPlan};
use crate::nearest::nearest;
use crate::registry::{Registry, StationRecord};
use ambumap_geo::Coordinate;
use wasm_bindgen::prelude::*;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn overrides_from(registry: &Registry, hidden: &[u32]) -> VisibilityOverrides {
    registry
        .iter()
        .filter(|s| hidden.contains(&(s.id().index() as u32)))
        .map(StationRecord::id)
        .collect()
}

/// All stations as a JSON array, in registry order.
#[wasm_bindgen]
pub fn stations_json() -> Result<String, JsValue> {
    serde_json::to_string(Registry::la_rioja().as_slice()).map_err(to_js)
}

/// Indices of the stations visible under the given flags.
///
/// # Arguments
/// * `hidden` - Indices the user switched off individually
#[wasm_bindgen]
pub fn visible_station_ids(
    show_basic_support: bool,
    show_advanced_support: bool,
    show_always: bool,
    show_day_only: bool,
    hidden: Vec<u32>,
) -> Vec<u32> {
    let registry = Registry::la_rioja();
    let flags = FilterFlags { show_basic_support, show_advanced_support, show_always, show_day_only };
    let overrides = overrides_from(registry, &hidden);

    visible_stations(registry, &flags, &overrides)
        .into_iter()
        .map(|s| s.id().index() as u32)
        .collect()
}

/// Nearest station across the whole table, as JSON
/// `{"id", "name", "distance_km"}`.
#[wasm_bindgen]
pub fn nearest_station(lat: f64, lng: f64) -> Result<String, JsValue> {
    let position = Coordinate::try_new(lat, lng).map_err(to_js)?;
    let hit = nearest(&position, Registry::la_rioja()).map_err(to_js)?;

    let result = serde_json::json!({
        "id": hit.station.id(),
        "name": hit.station.name(),
        "distance_km": hit.distance_km,
    });
    Ok(result.to_string())
}

/// Render plan for the visible stations, as JSON.
///
/// Pass `NaN` for `lat`/`lng` when the user position is unknown.
#[wasm_bindgen]
pub fn render_plan_json(
    show_basic_support: bool,
    show_advanced_support: bool,
    show_always: bool,
    show_day_only: bool,
    hidden: Vec<u32>,
    lat: f64,
    lng: f64,
) -> Result<String, JsValue> {
    let registry = Registry::la_rioja();
    let flags = FilterFlags { show_basic_support, show_advanced_support, show_always, show_day_only };
    let overrides = overrides_from(registry, &hidden);
    let user = Coordinate::try_new(lat, lng).ok();

    let visible = visible_stations(registry, &flags, &overrides);
    let plan = RenderPlan::build(&visible, &CoverageRing::defaults(), user);
    serde_json::to_string(&plan).map_err(to_js)
}

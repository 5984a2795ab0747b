//! Map adapter boundary
//!
//! The core never draws anything. It builds a [`RenderPlan`] describing the
//! markers, coverage rings and user marker for the current visible set, and
//! hands it to whatever implements [`MapAdapter`].

use crate::registry::{Category, Registry, Schedule, StationId, StationRecord};
use ambumap_geo::{distance_km, Coordinate};
use serde::{Deserialize, Serialize};

/// Marker color, keyed by category and schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    /// SVA, 24 h
    Red,
    /// SVA, daytime only
    Orange,
    /// SVB, 24 h
    Blue,
    /// SVB, daytime only
    Green,
}

impl MarkerColor {
    /// Color for a station of the given tiers.
    pub fn for_station(category: Category, schedule: Schedule) -> Self {
        match (category, schedule) {
            (Category::AdvancedSupport, Schedule::Always) => MarkerColor::Red,
            (Category::AdvancedSupport, Schedule::DayOnly) => MarkerColor::Orange,
            (Category::BasicSupport, Schedule::Always) => MarkerColor::Blue,
            (Category::BasicSupport, Schedule::DayOnly) => MarkerColor::Green,
        }
    }

    /// CSS hex value.
    pub fn hex(self) -> &'static str {
        match self {
            MarkerColor::Red => "#dc2626",
            MarkerColor::Orange => "#f97316",
            MarkerColor::Blue => "#2563eb",
            MarkerColor::Green => "#16a34a",
        }
    }
}

/// Fixed-radius shaded circle drawn around every station. Display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRing {
    /// Radius in kilometers
    pub radius_km: f64,
    /// Stroke and fill color
    pub color: String,
    /// Fill opacity, 0..=1
    pub fill_opacity: f64,
}

impl CoverageRing {
    /// Radius in meters, as most map widgets expect.
    pub fn radius_m(&self) -> f64 {
        self.radius_km * 1000.0
    }

    /// The 10 km and 15 km rings.
    pub fn defaults() -> Vec<CoverageRing> {
        vec![
            CoverageRing { radius_km: 10.0, color: "blue".to_string(), fill_opacity: 0.18 },
            CoverageRing { radius_km: 15.0, color: "red".to_string(), fill_opacity: 0.12 },
        ]
    }
}

/// Viewport center and zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// Viewport center
    pub center: Coordinate,
    /// Zoom level
    pub zoom: u8,
}

/// Zoom levels used when moving the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    /// Zoom at startup, centered on the registry reference point
    #[serde(default = "default_initial_zoom")]
    pub initial_zoom: u8,

    /// Zoom after locating the user
    #[serde(default = "default_user_zoom")]
    pub user_zoom: u8,

    /// Zoom when centering on a single station
    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: u8,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            initial_zoom: default_initial_zoom(),
            user_zoom: default_user_zoom(),
            focus_zoom: default_focus_zoom(),
        }
    }
}

fn default_initial_zoom() -> u8 {
    10
}

fn default_user_zoom() -> u8 {
    12
}

fn default_focus_zoom() -> u8 {
    14
}

impl ViewSettings {
    /// Startup view over the registry's reference center.
    pub fn initial_view(&self, registry: &Registry) -> MapView {
        MapView { center: registry.center(), zoom: self.initial_zoom }
    }

    /// View centered on the user.
    pub fn user_view(&self, position: Coordinate) -> MapView {
        MapView { center: position, zoom: self.user_zoom }
    }

    /// View centered on one station.
    pub fn station_view(&self, station: &StationRecord) -> MapView {
        MapView { center: station.coordinate(), zoom: self.focus_zoom }
    }
}

/// One station marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    /// Station id, for click-through
    pub station: StationId,
    /// Display name
    pub name: String,
    /// Capability tier
    pub category: Category,
    /// Operating hours tier
    pub schedule: Schedule,
    /// Marker position
    pub coordinate: Coordinate,
    /// Marker color
    pub color: MarkerColor,
    /// Distance from the user, when the user position is known
    pub distance_km: Option<f64>,
}

impl MarkerSpec {
    /// Text lines for the marker popup.
    pub fn popup_lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.name.clone(),
            format!("Type: {}", self.category),
            format!("Schedule: {}", self.schedule),
        ];
        if let Some(km) = self.distance_km {
            lines.push(format!("Distance: {}", format_distance(km)));
        }
        lines
    }
}

/// Everything a map widget needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    /// Markers in registry order
    pub markers: Vec<MarkerSpec>,
    /// Rings drawn around each marker
    pub rings: Vec<CoverageRing>,
    /// User marker, if located
    pub user_position: Option<Coordinate>,
}

impl RenderPlan {
    /// Builds markers for `stations`, attaching distances when `user` is known.
    pub fn build(stations: &[&StationRecord], rings: &[CoverageRing], user: Option<Coordinate>) -> Self {
        let markers = stations
            .iter()
            .map(|station| MarkerSpec {
                station: station.id(),
                name: station.name().to_string(),
                category: station.category(),
                schedule: station.schedule(),
                coordinate: station.coordinate(),
                color: MarkerColor::for_station(station.category(), station.schedule()),
                distance_km: user.map(|u| distance_km(&u, &station.coordinate())),
            })
            .collect();

        Self { markers, rings: rings.to_vec(), user_position: user }
    }
}

/// A rendering surface the core can push state into.
pub trait MapAdapter {
    /// Replace all markers, rings and the user marker with `plan`.
    fn render(&mut self, plan: &RenderPlan);

    /// Move the viewport.
    fn set_view(&mut self, view: MapView);
}

/// Formats a distance with one decimal, e.g. `"3.4 km"`.
pub fn format_distance(km: f64) -> String {
    format!("{km:.1} km")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_colors() {
        use Category::*;
        use Schedule::*;
        assert_eq!(MarkerColor::for_station(AdvancedSupport, Always), MarkerColor::Red);
        assert_eq!(MarkerColor::for_station(AdvancedSupport, DayOnly), MarkerColor::Orange);
        assert_eq!(MarkerColor::for_station(BasicSupport, Always), MarkerColor::Blue);
        assert_eq!(MarkerColor::for_station(BasicSupport, DayOnly), MarkerColor::Green);
        assert_eq!(MarkerColor::Orange.hex(), "#f97316");
    }

    #[test]
    fn test_default_rings() {
        let rings = CoverageRing::defaults();
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].radius_m(), 10_000.0);
        assert_eq!(rings[1].color, "red");
    }

    #[test]
    fn test_views() {
        let registry = Registry::la_rioja();
        let settings = ViewSettings::default();
        assert_eq!(
            settings.initial_view(registry),
            MapView { center: registry.center(), zoom: 10 }
        );

        let user = Coordinate::new(42.46, -2.44);
        assert_eq!(settings.user_view(user).zoom, 12);

        let haro = registry.find_by_name("Haro SVA").unwrap();
        let view = settings.station_view(haro);
        assert_eq!(view.center, haro.coordinate());
        assert_eq!(view.zoom, 14);
    }

    #[test]
    fn test_render_plan_without_user() {
        let registry = Registry::la_rioja();
        let stations: Vec<&StationRecord> = registry.iter().take(3).collect();
        let plan = RenderPlan::build(&stations, &CoverageRing::defaults(), None);

        assert_eq!(plan.markers.len(), 3);
        assert!(plan.markers.iter().all(|m| m.distance_km.is_none()));
        assert_eq!(plan.markers[2].name, "Calahorra SVA");
        assert_eq!(plan.markers[2].color, MarkerColor::Red);
        assert_eq!(plan.markers[0].popup_lines(), ["Arnedo SVB", "Type: SVB", "Schedule: 24 h"]);
    }

    #[test]
    fn test_render_plan_with_user_distances() {
        let registry = Registry::la_rioja();
        let arnedo = registry.find_by_name("Arnedo SVB").unwrap();
        let haro = registry.find_by_name("Haro SVB").unwrap();
        let plan = RenderPlan::build(&[haro], &[], Some(arnedo.coordinate()));

        let marker = &plan.markers[0];
        let km = marker.distance_km.unwrap();
        assert!((km - 72.58).abs() < 0.05);
        assert_eq!(marker.popup_lines().last().unwrap(), "Distance: 72.6 km");
        assert_eq!(plan.user_position, Some(arnedo.coordinate()));
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.0), "0.0 km");
        assert_eq!(format_distance(3.456), "3.5 km");
        assert_eq!(format_distance(72.5789), "72.6 km");
    }
}

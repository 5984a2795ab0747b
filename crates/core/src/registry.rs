//! Station registry
//!
//! The registry is the fixed, ordered table of known ambulance stations plus
//! the reference point used to center the map. It is built once and handed out
//! by shared reference; nothing mutates it afterwards.
//!
//! Every record gets a [`StationId`] at load time. Per-station state (such as
//! visibility overrides) is keyed by that id, so renaming a station in the
//! source table never orphans state.

use crate::error::{Error, Result};
use ambumap_geo::Coordinate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// Stable identifier assigned to a station when the registry is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(usize);

impl StationId {
    /// Position of the station in registry order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Service capability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Basic life support (SVB)
    #[serde(rename = "SVB", alias = "BasicSupport")]
    BasicSupport,
    /// Advanced life support (SVA)
    #[serde(rename = "SVA", alias = "AdvancedSupport")]
    AdvancedSupport,
}

impl Category {
    /// Short code used on markers and in station names.
    pub fn code(self) -> &'static str {
        match self {
            Category::BasicSupport => "SVB",
            Category::AdvancedSupport => "SVA",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Operating hours tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Schedule {
    /// Staffed around the clock
    #[serde(rename = "24 h", alias = "24h", alias = "Always")]
    Always,
    /// Staffed twelve daytime hours
    #[serde(rename = "12 h (día)", alias = "12h", alias = "DayOnly")]
    DayOnly,
}

impl Schedule {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Schedule::Always => "24 h",
            Schedule::DayOnly => "12 h (día)",
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An immutable station as stored in the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    id: StationId,
    name: String,
    category: Category,
    schedule: Schedule,
    coordinate: Coordinate,
}

impl StationRecord {
    /// Registry-assigned identifier.
    #[inline]
    pub fn id(&self) -> StationId {
        self.id
    }

    /// Unique display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capability tier.
    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Operating hours tier.
    #[inline]
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Station location.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// Input shape for one station, before an id is assigned.
///
/// This is the contract any replacement data source must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSpec {
    /// Unique display name
    pub name: String,
    /// Capability tier
    pub category: Category,
    /// Operating hours tier
    pub schedule: Schedule,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl StationSpec {
    /// Convenience constructor.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        schedule: Schedule,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self { name: name.into(), category, schedule, latitude, longitude }
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    center: Coordinate,
    #[serde(default)]
    stations: Vec<StationSpec>,
}

/// Ordered, immutable set of stations plus the map's reference center.
#[derive(Debug, Clone)]
pub struct Registry {
    center: Coordinate,
    stations: Vec<StationRecord>,
    by_name: HashMap<String, StationId>,
}

/// Initial viewport center over La Rioja.
pub const LA_RIOJA_CENTER: Coordinate = Coordinate::new(42.287, -2.54);

use Category::{AdvancedSupport as Sva, BasicSupport as Svb};
use Schedule::{Always as H24, DayOnly as H12};

const LA_RIOJA_STATIONS: &[(&str, Category, Schedule, f64, f64)] = &[
    ("Arnedo SVB", Svb, H24, 42.2251, -2.1042),
    ("Calahorra SVB", Svb, H24, 42.3055, -1.9651),
    ("Calahorra SVA", Sva, H24, 42.3055, -1.9651),
    ("Alfaro SVB", Svb, H24, 42.1796, -1.7504),
    ("Cervera del Río Alhama SVB", Svb, H24, 41.9938, -1.9985),
    ("Nájera SVB", Svb, H24, 42.4177, -2.7347),
    ("Santo Domingo de la Calzada SVB", Svb, H24, 42.4407, -2.9546),
    ("Haro SVB", Svb, H24, 42.5766, -2.8490),
    ("Haro SVA", Sva, H24, 42.5766, -2.8490),
    ("Villamediana de Iregua SVB", Svb, H24, 42.4300, -2.4125),
    ("Ribafrecha SVB", Svb, H24, 42.3627, -2.3565),
    ("CARPA Logroño SVB (1)", Svb, H24, 42.4631, -2.4520),
    ("CARPA Logroño SVB (2)", Svb, H24, 42.4611, -2.4500),
    ("CARPA Logroño SVA", Sva, H24, 42.4621, -2.4510),
    ("Logroño - Cascajos SVB", Svb, H12, 42.45833, -2.44024),
    ("Logroño - Siete Infantes SVA", Sva, H12, 42.4580, -2.4600),
    ("Villanueva de Cameros SVB", Svb, H24, 42.1377, -2.6566),
    ("Cenicero SVB", Svb, H12, 42.5145, -2.6942),
];

static LA_RIOJA: Lazy<Registry> = Lazy::new(|| {
    let specs = LA_RIOJA_STATIONS
        .iter()
        .map(|&(name, category, schedule, lat, lng)| StationSpec::new(name, category, schedule, lat, lng));
    Registry::assemble(LA_RIOJA_CENTER, specs)
});

impl Registry {
    /// Builds a registry, assigning ids in input order.
    ///
    /// Fails with [`Error::DuplicateStation`] if two stations share a name and
    /// with [`Error::InvalidCoordinate`] if the center or any station lies
    /// outside valid latitude/longitude ranges.
    pub fn new(center: Coordinate, stations: impl IntoIterator<Item = StationSpec>) -> Result<Self> {
        Coordinate::try_new(center.latitude, center.longitude).map_err(|source| {
            Error::InvalidCoordinate { context: "reference center".to_string(), source }
        })?;

        let specs: Vec<StationSpec> = stations.into_iter().collect();
        let mut seen = HashSet::with_capacity(specs.len());
        for spec in &specs {
            Coordinate::try_new(spec.latitude, spec.longitude).map_err(|source| {
                Error::InvalidCoordinate { context: spec.name.clone(), source }
            })?;
            if !seen.insert(spec.name.as_str()) {
                return Err(Error::DuplicateStation(spec.name.clone()));
            }
        }

        Ok(Self::assemble(center, specs))
    }

    fn assemble(center: Coordinate, specs: impl IntoIterator<Item = StationSpec>) -> Self {
        let stations: Vec<StationRecord> = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| StationRecord {
                id: StationId(index),
                name: spec.name,
                category: spec.category,
                schedule: spec.schedule,
                coordinate: Coordinate::new(spec.latitude, spec.longitude),
            })
            .collect();
        let by_name = stations.iter().map(|s| (s.name.clone(), s.id)).collect();

        Self { center, stations, by_name }
    }

    /// The embedded La Rioja ambulance table.
    pub fn la_rioja() -> &'static Registry {
        &LA_RIOJA
    }

    /// Parses a station table from TOML.
    ///
    /// ```toml
    /// [center]
    /// latitude = 42.287
    /// longitude = -2.54
    ///
    /// [[stations]]
    /// name = "Haro SVB"
    /// category = "SVB"
    /// schedule = "24 h"
    /// latitude = 42.5766
    /// longitude = -2.8490
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RegistryFile = toml::from_str(content)?;
        Self::new(file.center, file.stations)
    }

    /// Reads and parses a TOML station table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let registry = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), stations = registry.len(), "Loaded station table");
        Ok(registry)
    }

    /// Initial map viewport center. Not used in any computation.
    #[inline]
    pub fn center(&self) -> Coordinate {
        self.center
    }

    /// Number of stations.
    #[inline]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// True if the registry holds no stations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, StationRecord> {
        self.stations.iter()
    }

    /// Stations as a slice, in registry order.
    pub fn as_slice(&self) -> &[StationRecord] {
        &self.stations
    }

    /// Station by id.
    pub fn get(&self, id: StationId) -> Option<&StationRecord> {
        self.stations.get(id.0)
    }

    /// Station by exact name.
    pub fn find_by_name(&self, name: &str) -> Option<&StationRecord> {
        self.by_name.get(name).and_then(|&id| self.get(id))
    }

    /// Station names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stations.iter().map(StationRecord::name)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a StationRecord;
    type IntoIter = std::slice::Iter<'a, StationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_la_rioja_table_shape() {
        let registry = Registry::la_rioja();
        assert_eq!(registry.len(), 18);
        assert_eq!(registry.center(), LA_RIOJA_CENTER);
        assert_eq!(registry.as_slice()[0].name(), "Arnedo SVB");
        assert_eq!(registry.as_slice()[17].name(), "Cenicero SVB");

        let advanced = registry.iter().filter(|s| s.category() == Category::AdvancedSupport).count();
        let day_only = registry.iter().filter(|s| s.schedule() == Schedule::DayOnly).count();
        assert_eq!(advanced, 4);
        assert_eq!(day_only, 3);
    }

    #[test]
    fn test_la_rioja_table_passes_validation() {
        let registry = Registry::la_rioja();
        let specs = registry.iter().map(|s| {
            let c = s.coordinate();
            StationSpec::new(s.name(), s.category(), s.schedule(), c.latitude, c.longitude)
        });
        let rebuilt = Registry::new(registry.center(), specs).unwrap();
        assert_eq!(rebuilt.as_slice(), registry.as_slice());
    }

    #[test]
    fn test_ids_follow_registry_order() {
        let registry = Registry::la_rioja();
        for (index, station) in registry.iter().enumerate() {
            assert_eq!(station.id().index(), index);
            assert_eq!(registry.get(station.id()), Some(station));
        }
    }

    #[test]
    fn test_find_by_name() {
        let registry = Registry::la_rioja();
        let haro = registry.find_by_name("Haro SVA").unwrap();
        assert_eq!(haro.category(), Category::AdvancedSupport);
        assert_eq!(haro.schedule(), Schedule::Always);
        assert!(registry.find_by_name("haro sva").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let specs = vec![
            StationSpec::new("A", Category::BasicSupport, Schedule::Always, 42.0, -2.0),
            StationSpec::new("A", Category::AdvancedSupport, Schedule::DayOnly, 42.1, -2.1),
        ];
        let err = Registry::new(LA_RIOJA_CENTER, specs).unwrap_err();
        assert!(matches!(err, Error::DuplicateStation(name) if name == "A"));
    }

    #[test]
    fn test_invalid_coordinate_rejected() {
        let specs = vec![StationSpec::new("Nowhere", Category::BasicSupport, Schedule::Always, 95.0, 0.0)];
        let err = Registry::new(LA_RIOJA_CENTER, specs).unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinate { ref context, .. } if context == "Nowhere"));

        let err = Registry::new(Coordinate::new(0.0, f64::NAN), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_from_toml_str_accepts_codes_and_aliases() {
        let registry = Registry::from_toml_str(
            r#"
            [center]
            latitude = 40.0
            longitude = -3.7

            [[stations]]
            name = "Centro SVA"
            category = "SVA"
            schedule = "24 h"
            latitude = 40.4168
            longitude = -3.7038

            [[stations]]
            name = "Norte SVB"
            category = "BasicSupport"
            schedule = "12h"
            latitude = 40.48
            longitude = -3.69
            "#,
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.center(), Coordinate::new(40.0, -3.7));
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["Centro SVA", "Norte SVB"]);
        assert_eq!(registry.as_slice()[1].schedule(), Schedule::DayOnly);
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_category() {
        let err = Registry::from_toml_str(
            r#"
            [center]
            latitude = 40.0
            longitude = -3.7

            [[stations]]
            name = "Heli"
            category = "HEMS"
            schedule = "24 h"
            latitude = 40.0
            longitude = -3.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[center]\nlatitude = 42.0\nlongitude = -2.0\n\n[[stations]]\nname = \"Solo SVB\"\ncategory = \"SVB\"\nschedule = \"24 h\"\nlatitude = 42.1\nlongitude = -2.1"
        )
        .unwrap();

        let registry = Registry::load(file.path()).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Registry::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}

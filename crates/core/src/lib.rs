//! Station registry, filtering and nearest-station ranking for ambumap.
//!
//! This crate provides:
//!
//! - **Registry**: the immutable, ordered station table with stable ids
//! - **Filter engine**: category/schedule flags plus per-station overrides
//! - **Nearest finder**: haversine nearest-station lookup and ranking
//! - **Location boundary**: async position providers with typed failures
//! - **Map boundary**: render plans handed to an external map widget
//! - **Session**: UI-owned state tying the pieces together
//! - **Configuration**: TOML-based configuration with validation
//!
//! # Example
//!
//! ```
//! use ambumap_core::{nearest, visible_stations, FilterFlag, FilterFlags, Registry, VisibilityOverrides};
//! use ambumap_geo::Coordinate;
//!
//! let registry = Registry::la_rioja();
//! let flags = FilterFlags::default().with(FilterFlag::AdvancedSupport, false);
//! let visible = visible_stations(registry, &flags, &VisibilityOverrides::new());
//! assert_eq!(visible.len(), 14);
//!
//! let logrono = Coordinate::new(42.4650, -2.4450);
//! let hit = nearest(&logrono, visible).unwrap();
//! assert_eq!(hit.station.name(), "CARPA Logroño SVB (2)");
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod filter;
pub mod location;
pub mod map;
pub mod nearest;
pub mod registry;
pub mod session;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{Error, ErrorCode, Result};
pub use filter::{
    set_all_visibility, toggle_visibility, toggle_visibility_id, visible_stations, FilterFlag,
    FilterFlags, VisibilityOverrides,
};
pub use nearest::{nearest, ranked, NearestResult, NearestScope};
pub use registry::{Category, Registry, Schedule, StationId, StationRecord, StationSpec};
pub use session::{LocationFix, MapSession};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result};
    pub use crate::filter::{FilterFlag, FilterFlags, VisibilityOverrides};
    pub use crate::location::{FixedLocation, LocationError, LocationProvider, NoLocation};
    pub use crate::map::{format_distance, MapAdapter, MapView, RenderPlan};
    pub use crate::nearest::NearestScope;
    pub use crate::registry::{Category, Registry, Schedule, StationId, StationRecord};
    pub use crate::session::{LocationFix, MapSession};
    pub use ambumap_geo::{distance_km, Coordinate};
}

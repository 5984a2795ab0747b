//! Interactive map session state
//!
//! [`MapSession`] owns everything a UI shell mutates: filter flags,
//! visibility overrides, the last known user position, and the sidebar
//! state. Each instance is independent; there is no shared global state.
//! Derived values (visible set, nearest station, render plan) are recomputed
//! on every read.

use crate::config::ConfigSchema;
use crate::error::{Error, Result};
use crate::filter::{self, FilterFlag, FilterFlags, VisibilityOverrides};
use crate::location::{request_position, LocationProvider};
use crate::map::{format_distance, CoverageRing, MapAdapter, MapView, RenderPlan, ViewSettings};
use crate::nearest::{self, NearestResult, NearestScope};
use crate::registry::{Registry, StationId, StationRecord};
use ambumap_geo::Coordinate;
use std::sync::Arc;

/// Outcome of a successful location request.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    /// The position reported by the provider
    pub position: Coordinate,
    /// Closest station under the session's scope
    pub station: StationId,
    /// Its display name
    pub station_name: String,
    /// Distance to it in kilometers
    pub distance_km: f64,
    /// Viewport centered on the user
    pub view: MapView,
}

impl LocationFix {
    /// User-facing summary, e.g. `Nearest ambulance: Haro SVB (3.2 km)`.
    pub fn message(&self) -> String {
        format!("Nearest ambulance: {} ({})", self.station_name, format_distance(self.distance_km))
    }
}

/// UI-owned state over a shared, read-only registry.
#[derive(Debug, Clone)]
pub struct MapSession {
    registry: Arc<Registry>,
    flags: FilterFlags,
    overrides: VisibilityOverrides,
    user_position: Option<Coordinate>,
    scope: NearestScope,
    rings: Vec<CoverageRing>,
    views: ViewSettings,
    sidebar_collapsed: bool,
}

impl MapSession {
    /// Fresh session: all flags on, every station visible, no position.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            flags: FilterFlags::default(),
            overrides: VisibilityOverrides::new(),
            user_position: None,
            scope: NearestScope::default(),
            rings: CoverageRing::defaults(),
            views: ViewSettings::default(),
            sidebar_collapsed: false,
        }
    }

    /// Fresh session using the configured scope, rings and zoom levels.
    pub fn from_config(registry: Arc<Registry>, schema: &ConfigSchema) -> Self {
        Self {
            scope: schema.nearest.scope,
            rings: schema.coverage.rings.clone(),
            views: schema.map,
            ..Self::new(registry)
        }
    }

    /// Overrides the nearest-station scope.
    #[must_use]
    pub fn with_scope(mut self, scope: NearestScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn flags(&self) -> FilterFlags {
        self.flags
    }

    pub fn overrides(&self) -> &VisibilityOverrides {
        &self.overrides
    }

    pub fn user_position(&self) -> Option<Coordinate> {
        self.user_position
    }

    pub fn scope(&self) -> NearestScope {
        self.scope
    }

    pub fn is_sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    /// Flips one category/schedule flag.
    pub fn toggle_filter(&mut self, flag: FilterFlag) {
        self.flags.toggle(flag);
        tracing::debug!(?flag, value = self.flags.get(flag), "Filter toggled");
    }

    /// Flips one station's visibility. Unknown names leave state untouched.
    pub fn toggle_station(&mut self, name: &str) -> Result<()> {
        self.overrides = filter::toggle_visibility(&self.registry, &self.overrides, name)?;
        Ok(())
    }

    /// Shows or hides every station at once.
    pub fn set_all_visible(&mut self, visible: bool) {
        self.overrides = filter::set_all_visibility(&self.registry, visible);
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    /// Stations passing the current flags and overrides.
    pub fn visible(&self) -> Vec<&StationRecord> {
        filter::visible_stations(&self.registry, &self.flags, &self.overrides)
    }

    /// Nearest station to the last known position, under the session scope.
    ///
    /// `Ok(None)` until a position is known. With [`NearestScope::VisibleOnly`]
    /// and nothing visible this fails with [`Error::EmptyCandidateSet`].
    pub fn nearest(&self) -> Result<Option<NearestResult<'_>>> {
        let Some(position) = self.user_position else {
            return Ok(None);
        };
        let hit = match self.scope {
            NearestScope::AllStations => nearest::nearest(&position, self.registry.iter())?,
            NearestScope::VisibleOnly => nearest::nearest(&position, self.visible())?,
        };
        Ok(Some(hit))
    }

    /// Markers and rings for the visible set.
    pub fn render_plan(&self) -> RenderPlan {
        RenderPlan::build(&self.visible(), &self.rings, self.user_position)
    }

    /// Pushes the current render plan to `adapter`.
    pub fn refresh<A: MapAdapter>(&self, adapter: &mut A) {
        let plan = self.render_plan();
        tracing::debug!(markers = plan.markers.len(), "Refreshing map");
        adapter.render(&plan);
    }

    /// Startup viewport.
    pub fn initial_view(&self) -> MapView {
        self.views.initial_view(&self.registry)
    }

    /// Viewport centered on the named station.
    pub fn focus_station(&self, name: &str) -> Result<MapView> {
        let station = self
            .registry
            .find_by_name(name)
            .ok_or_else(|| Error::UnknownStation(name.to_string()))?;
        Ok(self.views.station_view(station))
    }

    /// Asks `provider` for the user's position and finds the nearest station.
    ///
    /// On failure the error is returned as [`Error::LocationUnavailable`] and
    /// no state changes. On success the stored position is overwritten before
    /// the nearest lookup runs.
    pub async fn locate<P: LocationProvider>(&mut self, provider: &P) -> Result<LocationFix> {
        let position = match request_position(provider).await {
            Ok(position) => position,
            Err(reason) => {
                tracing::warn!(%reason, "Could not get location");
                return Err(Error::LocationUnavailable(reason));
            }
        };

        self.user_position = Some(position);

        let hit = self.nearest()?.ok_or(Error::EmptyCandidateSet)?;
        let fix = LocationFix {
            position,
            station: hit.station.id(),
            station_name: hit.station.name().to_string(),
            distance_km: hit.distance_km,
            view: self.views.user_view(position),
        };

        tracing::info!(
            station = %fix.station_name,
            distance_km = fix.distance_km,
            scope = %self.scope,
            "Nearest ambulance found"
        );

        Ok(fix)
    }
}

//! Filter engine
//!
//! Computes which registry stations are visible under the active
//! category/schedule flags and per-station overrides. Every function here is
//! pure: inputs are borrowed, outputs are fresh values, and the visible set is
//! recomputed in full on each call.

use crate::error::{Error, Result};
use crate::registry::{Category, Registry, Schedule, StationId, StationRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Names one of the four filter toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterFlag {
    /// Basic life support units
    BasicSupport,
    /// Advanced life support units
    AdvancedSupport,
    /// 24 h stations
    Always,
    /// Daytime-only stations
    DayOnly,
}

impl FilterFlag {
    /// All flags, in display order.
    pub const ALL: [FilterFlag; 4] = [
        FilterFlag::BasicSupport,
        FilterFlag::AdvancedSupport,
        FilterFlag::Always,
        FilterFlag::DayOnly,
    ];
}

/// Category and schedule toggles. All enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterFlags {
    /// Show SVB stations
    pub show_basic_support: bool,
    /// Show SVA stations
    pub show_advanced_support: bool,
    /// Show 24 h stations
    pub show_always: bool,
    /// Show daytime-only stations
    pub show_day_only: bool,
}

impl Default for FilterFlags {
    fn default() -> Self {
        Self {
            show_basic_support: true,
            show_advanced_support: true,
            show_always: true,
            show_day_only: true,
        }
    }
}

impl FilterFlags {
    /// Current value of one flag.
    pub fn get(&self, flag: FilterFlag) -> bool {
        match flag {
            FilterFlag::BasicSupport => self.show_basic_support,
            FilterFlag::AdvancedSupport => self.show_advanced_support,
            FilterFlag::Always => self.show_always,
            FilterFlag::DayOnly => self.show_day_only,
        }
    }

    /// Returns a copy with one flag set to `value`.
    #[must_use]
    pub fn with(mut self, flag: FilterFlag, value: bool) -> Self {
        *self.slot(flag) = value;
        self
    }

    /// Flips one flag in place.
    pub fn toggle(&mut self, flag: FilterFlag) {
        let slot = self.slot(flag);
        *slot = !*slot;
    }

    fn slot(&mut self, flag: FilterFlag) -> &mut bool {
        match flag {
            FilterFlag::BasicSupport => &mut self.show_basic_support,
            FilterFlag::AdvancedSupport => &mut self.show_advanced_support,
            FilterFlag::Always => &mut self.show_always,
            FilterFlag::DayOnly => &mut self.show_day_only,
        }
    }

    /// Category condition.
    #[inline]
    pub fn matches_category(&self, category: Category) -> bool {
        (self.show_basic_support && category == Category::BasicSupport)
            || (self.show_advanced_support && category == Category::AdvancedSupport)
    }

    /// Schedule condition.
    #[inline]
    pub fn matches_schedule(&self, schedule: Schedule) -> bool {
        (self.show_always && schedule == Schedule::Always)
            || (self.show_day_only && schedule == Schedule::DayOnly)
    }
}

/// Per-station visibility. Stations not explicitly hidden are visible.
///
/// Only hidden ids are stored, so toggling a station twice restores an
/// identical value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityOverrides {
    hidden: BTreeSet<StationId>,
}

impl VisibilityOverrides {
    /// Everything visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective visibility of a station.
    #[inline]
    pub fn is_visible(&self, id: StationId) -> bool {
        !self.hidden.contains(&id)
    }

    /// Ids currently hidden, ascending.
    pub fn hidden(&self) -> impl Iterator<Item = StationId> + '_ {
        self.hidden.iter().copied()
    }

    /// Number of hidden stations.
    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    fn flipped(&self, id: StationId) -> Self {
        let mut next = self.clone();
        if !next.hidden.remove(&id) {
            next.hidden.insert(id);
        }
        next
    }
}

impl FromIterator<StationId> for VisibilityOverrides {
    /// Collects the given ids as hidden.
    fn from_iter<I: IntoIterator<Item = StationId>>(iter: I) -> Self {
        Self { hidden: iter.into_iter().collect() }
    }
}

/// Returns the stations passing the category, schedule and override checks,
/// in registry order.
///
/// With both category flags off the result is empty; that is a valid state,
/// not an error.
pub fn visible_stations<'r>(
    registry: &'r Registry,
    flags: &FilterFlags,
    overrides: &VisibilityOverrides,
) -> Vec<&'r StationRecord> {
    let visible: Vec<&StationRecord> = registry
        .iter()
        .filter(|station| {
            flags.matches_category(station.category())
                && flags.matches_schedule(station.schedule())
                && overrides.is_visible(station.id())
        })
        .collect();

    tracing::debug!(
        total = registry.len(),
        visible = visible.len(),
        hidden = overrides.hidden_count(),
        ?flags,
        "Recomputed visible stations"
    );

    visible
}

/// Overrides with every registry station set to `visible`.
pub fn set_all_visibility(registry: &Registry, visible: bool) -> VisibilityOverrides {
    if visible {
        VisibilityOverrides::new()
    } else {
        registry.iter().map(StationRecord::id).collect()
    }
}

/// Flips the override for the station called `name`.
///
/// Fails with [`Error::UnknownStation`] if no such station exists; the input
/// overrides are never modified.
pub fn toggle_visibility(
    registry: &Registry,
    overrides: &VisibilityOverrides,
    name: &str,
) -> Result<VisibilityOverrides> {
    let station = registry
        .find_by_name(name)
        .ok_or_else(|| Error::UnknownStation(name.to_string()))?;
    Ok(overrides.flipped(station.id()))
}

/// Flips the override for a station id.
///
/// Fails with [`Error::UnknownStation`] if the id is not in the registry.
pub fn toggle_visibility_id(
    registry: &Registry,
    overrides: &VisibilityOverrides,
    id: StationId,
) -> Result<VisibilityOverrides> {
    if registry.get(id).is_none() {
        return Err(Error::UnknownStation(id.to_string()));
    }
    Ok(overrides.flipped(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names<'a>(stations: &[&'a StationRecord]) -> Vec<&'a str> {
        stations.iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_defaults_show_everything() {
        let registry = Registry::la_rioja();
        let visible = visible_stations(registry, &FilterFlags::default(), &VisibilityOverrides::new());
        assert_eq!(visible.len(), registry.len());
        assert!(visible.iter().zip(registry.iter()).all(|(a, b)| a.id() == b.id()));
    }

    #[test]
    fn test_day_only_filter() {
        let registry = Registry::la_rioja();
        let flags = FilterFlags::default().with(FilterFlag::Always, false);
        let visible = visible_stations(registry, &flags, &VisibilityOverrides::new());
        assert_eq!(
            names(&visible),
            ["Logroño - Cascajos SVB", "Logroño - Siete Infantes SVA", "Cenicero SVB"]
        );
    }

    #[test]
    fn test_category_and_schedule_combine() {
        let registry = Registry::la_rioja();
        let flags = FilterFlags::default()
            .with(FilterFlag::BasicSupport, false)
            .with(FilterFlag::Always, false);
        let visible = visible_stations(registry, &flags, &VisibilityOverrides::new());
        assert_eq!(names(&visible), ["Logroño - Siete Infantes SVA"]);
    }

    #[test]
    fn test_no_schedule_flags_hides_everything() {
        let registry = Registry::la_rioja();
        let flags = FilterFlags::default()
            .with(FilterFlag::Always, false)
            .with(FilterFlag::DayOnly, false);
        assert!(visible_stations(registry, &flags, &VisibilityOverrides::new()).is_empty());
    }

    #[test]
    fn test_toggle_flag() {
        let mut flags = FilterFlags::default();
        flags.toggle(FilterFlag::AdvancedSupport);
        assert!(!flags.show_advanced_support);
        assert!(flags.show_basic_support);
        flags.toggle(FilterFlag::AdvancedSupport);
        assert_eq!(flags, FilterFlags::default());
    }

    #[test]
    fn test_toggle_visibility_hides_one_station() {
        let registry = Registry::la_rioja();
        let overrides = toggle_visibility(registry, &VisibilityOverrides::new(), "Haro SVA").unwrap();
        let visible = visible_stations(registry, &FilterFlags::default(), &overrides);
        assert_eq!(visible.len(), 17);
        assert!(!names(&visible).contains(&"Haro SVA"));
        assert!(names(&visible).contains(&"Haro SVB"));
    }

    #[test]
    fn test_toggle_visibility_does_not_mutate_input() {
        let registry = Registry::la_rioja();
        let original = VisibilityOverrides::new();
        let _ = toggle_visibility(registry, &original, "Alfaro SVB").unwrap();
        assert_eq!(original.hidden_count(), 0);
    }

    #[test]
    fn test_toggle_unknown_station() {
        let registry = Registry::la_rioja();
        let err = toggle_visibility(registry, &VisibilityOverrides::new(), "Atlantis SVB").unwrap_err();
        assert!(matches!(err, Error::UnknownStation(name) if name == "Atlantis SVB"));
    }

    #[test]
    fn test_toggle_unknown_id() {
        let registry = Registry::la_rioja();
        let overrides = VisibilityOverrides::new();
        let last = registry.as_slice()[registry.len() - 1].id();
        assert!(toggle_visibility_id(registry, &overrides, last).is_ok());

        let bogus = serde_json::from_str::<StationId>("99").unwrap();
        assert!(matches!(
            toggle_visibility_id(registry, &overrides, bogus),
            Err(Error::UnknownStation(_))
        ));
    }

    #[test]
    fn test_select_all_and_none() {
        let registry = Registry::la_rioja();
        let some_hidden = toggle_visibility(registry, &VisibilityOverrides::new(), "Nájera SVB").unwrap();
        assert_eq!(some_hidden.hidden_count(), 1);

        let all = set_all_visibility(registry, true);
        assert!(registry.iter().all(|s| all.is_visible(s.id())));
        assert_eq!(visible_stations(registry, &FilterFlags::default(), &all).len(), 18);

        let none = set_all_visibility(registry, false);
        assert!(registry.iter().all(|s| !none.is_visible(s.id())));
        for flag in FilterFlag::ALL {
            let flags = FilterFlags::default().with(flag, false);
            assert!(visible_stations(registry, &flags, &none).is_empty());
        }
    }

    fn flags_strategy() -> impl Strategy<Value = FilterFlags> {
        any::<(bool, bool, bool, bool)>().prop_map(|(b, a, h24, h12)| FilterFlags {
            show_basic_support: b,
            show_advanced_support: a,
            show_always: h24,
            show_day_only: h12,
        })
    }

    fn overrides_strategy() -> impl Strategy<Value = VisibilityOverrides> {
        let ids: Vec<StationId> = Registry::la_rioja().iter().map(StationRecord::id).collect();
        proptest::sample::subsequence(ids.clone(), 0..=ids.len())
            .prop_map(|hidden| hidden.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_no_category_means_empty(
            h24 in any::<bool>(),
            h12 in any::<bool>(),
            overrides in overrides_strategy(),
        ) {
            let flags = FilterFlags {
                show_basic_support: false,
                show_advanced_support: false,
                show_always: h24,
                show_day_only: h12,
            };
            prop_assert!(visible_stations(Registry::la_rioja(), &flags, &overrides).is_empty());
        }

        #[test]
        fn prop_enabling_a_flag_never_hides(
            flags in flags_strategy(),
            overrides in overrides_strategy(),
            index in 0usize..4,
        ) {
            let registry = Registry::la_rioja();
            let before = visible_stations(registry, &flags, &overrides);
            let after = visible_stations(registry, &flags.with(FilterFlag::ALL[index], true), &overrides);
            for station in before {
                prop_assert!(after.iter().any(|s| s.id() == station.id()));
            }
        }

        #[test]
        fn prop_toggle_twice_is_identity(
            overrides in overrides_strategy(),
            index in 0usize..18,
        ) {
            let registry = Registry::la_rioja();
            let name = registry.as_slice()[index].name();
            let once = toggle_visibility(registry, &overrides, name).unwrap();
            prop_assert_ne!(&once, &overrides);
            let twice = toggle_visibility(registry, &once, name).unwrap();
            prop_assert_eq!(twice, overrides);
        }

        #[test]
        fn prop_output_preserves_registry_order(
            flags in flags_strategy(),
            overrides in overrides_strategy(),
        ) {
            let visible = visible_stations(Registry::la_rioja(), &flags, &overrides);
            prop_assert!(visible.windows(2).all(|w| w[0].id() < w[1].id()));
        }
    }
}

//! Nearest-station search
//!
//! Linear scans over a candidate set using haversine distance. Candidate
//! selection (whole registry vs. visible subset) belongs to the caller; see
//! [`NearestScope`].

use crate::error::{Error, Result};
use crate::registry::StationRecord;
use ambumap_geo::{distance_km, Coordinate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A station paired with its distance from the query position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NearestResult<'a> {
    /// The closest station
    pub station: &'a StationRecord,
    /// Great-circle distance in kilometers
    pub distance_km: f64,
}

/// Which stations a nearest-station lookup considers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NearestScope {
    /// Every registry station, even ones hidden by filters
    #[default]
    #[serde(rename = "all")]
    AllStations,
    /// Only the currently visible stations
    #[serde(rename = "visible")]
    VisibleOnly,
}

impl fmt::Display for NearestScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NearestScope::AllStations => f.write_str("all"),
            NearestScope::VisibleOnly => f.write_str("visible"),
        }
    }
}

/// Returns the candidate closest to `position`.
///
/// Ties go to the candidate encountered first. Fails with
/// [`Error::EmptyCandidateSet`] when there are no candidates.
///
/// # Example
/// ```
/// use ambumap_core::{nearest, Registry};
/// use ambumap_geo::Coordinate;
///
/// let registry = Registry::la_rioja();
/// let hit = nearest(&Coordinate::new(42.58, -2.85), registry).unwrap();
/// assert_eq!(hit.station.name(), "Haro SVB");
/// ```
pub fn nearest<'a, I>(position: &Coordinate, candidates: I) -> Result<NearestResult<'a>>
where
    I: IntoIterator<Item = &'a StationRecord>,
{
    let mut best: Option<NearestResult<'a>> = None;

    for station in candidates {
        let distance = distance_km(position, &station.coordinate());
        let closer = match best {
            Some(current) => distance < current.distance_km,
            None => true,
        };
        if closer {
            best = Some(NearestResult { station, distance_km: distance });
        }
    }

    best.ok_or(Error::EmptyCandidateSet)
}

/// All candidates ordered by distance from `position`, closest first.
///
/// Equal distances keep their input order. `limit` truncates the result.
pub fn ranked<'a, I>(position: &Coordinate, candidates: I, limit: Option<usize>) -> Vec<NearestResult<'a>>
where
    I: IntoIterator<Item = &'a StationRecord>,
{
    let mut results: Vec<NearestResult<'a>> = candidates
        .into_iter()
        .map(|station| NearestResult {
            station,
            distance_km: distance_km(position, &station.coordinate()),
        })
        .collect();

    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    if let Some(max) = limit {
        results.truncate(max);
    }

    results
}

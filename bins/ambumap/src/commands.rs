//! Subcommand implementations.

use crate::fail;
use ambumap_cli::output::{format_count, station_row, Status};
use ambumap_core::prelude::*;
use ambumap_core::ranked;
use serde_json::json;

/// Collects what the core pushes so it can be printed as one JSON document.
#[derive(Default)]
struct JsonMap {
    plan: Option<RenderPlan>,
    view: Option<MapView>,
}

impl MapAdapter for JsonMap {
    fn render(&mut self, plan: &RenderPlan) {
        self.plan = Some(plan.clone());
    }

    fn set_view(&mut self, view: MapView) {
        self.view = Some(view);
    }
}

fn checked(position: Option<Coordinate>) -> anyhow::Result<Option<Coordinate>> {
    match position {
        Some(p) => Ok(Some(Coordinate::try_new(p.latitude, p.longitude)?)),
        None => Ok(None),
    }
}

pub fn list(session: &MapSession, position: Option<Coordinate>, json: bool) -> anyhow::Result<()> {
    let position = checked(position)?;
    let visible = session.visible();
    let distance = |station: &StationRecord| position.map(|p| distance_km(&p, &station.coordinate()));

    if json {
        let rows: Vec<_> = visible
            .iter()
            .map(|s| {
                json!({
                    "id": s.id(),
                    "name": s.name(),
                    "category": s.category(),
                    "schedule": s.schedule(),
                    "latitude": s.coordinate().latitude,
                    "longitude": s.coordinate().longitude,
                    "distance_km": distance(*s),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    Status::header(&format!(
        "Visible stations ({} of {})",
        visible.len(),
        session.registry().len()
    ));
    if visible.is_empty() {
        Status::info("No stations match the current filters");
        return Ok(());
    }
    for station in &visible {
        println!("{}", station_row(station, distance(*station)));
    }
    println!();
    Status::info(&format_count(visible.len(), "station", "stations"));

    Ok(())
}

pub async fn nearest(
    session: &mut MapSession,
    position: Option<Coordinate>,
    top: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = match position {
        Some(p) => session.locate(&FixedLocation(p)).await,
        None => session.locate(&NoLocation(LocationError::PositionUnavailable)).await,
    };

    let fix = match outcome {
        Ok(fix) => fix,
        Err(Error::LocationUnavailable(reason)) => {
            Status::error(&format!("Could not get location: {}", reason));
            eprintln!("  Suggestion: pass --lat and --lng or set AMBUMAP_LAT and AMBUMAP_LNG");
            std::process::exit(exit_codes::FAILURE);
        }
        Err(e) => fail(&e),
    };

    let ranking = match top {
        Some(n) => {
            let candidates: Vec<&StationRecord> = match session.scope() {
                NearestScope::AllStations => session.registry().iter().collect(),
                NearestScope::VisibleOnly => session.visible(),
            };
            ranked(&fix.position, candidates, Some(n))
        }
        None => Vec::new(),
    };

    if json {
        let ranking: Vec<_> = ranking
            .iter()
            .map(|r| json!({ "id": r.station.id(), "name": r.station.name(), "distance_km": r.distance_km }))
            .collect();
        let report = json!({
            "position": fix.position,
            "scope": session.scope(),
            "station": { "id": fix.station, "name": fix.station_name },
            "distance_km": fix.distance_km,
            "view": fix.view,
            "ranking": ranking,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    Status::success(&fix.message());
    if !ranking.is_empty() {
        Status::header(&format!("Closest {} ({} stations)", ranking.len(), session.scope()));
        for (rank, hit) in ranking.iter().enumerate() {
            println!("{:>2}. {}", rank + 1, station_row(hit.station, Some(hit.distance_km)));
        }
    }

    Ok(())
}

pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> anyhow::Result<()> {
    let from = Coordinate::try_new(lat1, lng1)?;
    let to = Coordinate::try_new(lat2, lng2)?;
    println!("{:.3} km", distance_km(&from, &to));
    Ok(())
}

pub async fn render(
    session: &mut MapSession,
    position: Option<Coordinate>,
    focus: Option<&str>,
) -> anyhow::Result<()> {
    let mut map = JsonMap::default();
    map.set_view(session.initial_view());

    if let Some(p) = position {
        match session.locate(&FixedLocation(p)).await {
            Ok(fix) => map.set_view(fix.view),
            Err(e) => Status::warning(&e.to_string()),
        }
    }
    if let Some(name) = focus {
        map.set_view(session.focus_station(name).unwrap_or_else(|e| fail(&e)));
    }

    session.refresh(&mut map);

    let document = json!({ "view": map.view, "plan": map.plan });
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

//! ambumap: find and filter ambulance stations from the terminal.

mod commands;

use ambumap_cli::output::Status;
use ambumap_core::prelude::*;
use ambumap_telemetry::TelemetryConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ambumap")]
#[command(about = "Ambulance station directory with filtering and nearest-station lookup")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to .ambumap.toml or ambumap.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List visible stations
    List {
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        position: PositionArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find the station nearest to a position
    Nearest {
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        position: PositionArgs,
        /// Search all stations or only visible ones (overrides config)
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
        /// Also list the N closest stations
        #[arg(long)]
        top: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Great-circle distance between two points in kilometers
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
    },
    /// Print the map render plan and viewport as JSON
    Render {
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        position: PositionArgs,
        /// Center the viewport on this station
        #[arg(long, value_name = "NAME")]
        focus: Option<String>,
    },
}

/// Category, schedule and per-station visibility switches.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Hide basic life support (SVB) stations
    #[arg(long)]
    no_basic: bool,
    /// Hide advanced life support (SVA) stations
    #[arg(long)]
    no_advanced: bool,
    /// Hide 24 h stations
    #[arg(long)]
    no_always: bool,
    /// Hide daytime-only stations
    #[arg(long)]
    no_day_only: bool,
    /// Start with every station hidden
    #[arg(long)]
    none: bool,
    /// Flip visibility of a station by name (repeatable)
    #[arg(long, value_name = "NAME")]
    toggle: Vec<String>,
}

impl FilterArgs {
    fn apply(&self, session: &mut MapSession) -> ambumap_core::Result<()> {
        for (off, flag) in [
            (self.no_basic, FilterFlag::BasicSupport),
            (self.no_advanced, FilterFlag::AdvancedSupport),
            (self.no_always, FilterFlag::Always),
            (self.no_day_only, FilterFlag::DayOnly),
        ] {
            if off {
                session.toggle_filter(flag);
            }
        }
        if self.none {
            session.set_all_visible(false);
        }
        for name in &self.toggle {
            session.toggle_station(name)?;
        }
        Ok(())
    }
}

/// User position; stands in for the platform location service.
#[derive(Args, Debug, Default)]
struct PositionArgs {
    /// Latitude of the user
    #[arg(long, env = "AMBUMAP_LAT", requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude of the user
    #[arg(long, env = "AMBUMAP_LNG", requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,
}

impl PositionArgs {
    fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    All,
    Visible,
}

impl From<ScopeArg> for NearestScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::All => NearestScope::AllStations,
            ScopeArg::Visible => NearestScope::VisibleOnly,
        }
    }
}

/// Print a core error with its code and suggestion, then exit.
fn fail(err: &Error) -> ! {
    Status::error(&format!("[{}] {}", err.code(), err));
    if let Some(suggestion) = err.suggestion() {
        eprintln!("  Suggestion: {}", suggestion);
    }
    std::process::exit(err.exit_code());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| fail(&e));

    let logging = &config.schema.logging;
    let level = if cli.verbose { "debug".to_string() } else { logging.level.clone() };
    ambumap_telemetry::init_with_config(
        TelemetryConfig::with_level(level).json(cli.log_json || logging.json),
    )?;

    let registry = Arc::new(config.registry().unwrap_or_else(|e| fail(&e)));
    tracing::debug!(stations = registry.len(), config = ?config.path, "Registry ready");
    let mut session = MapSession::from_config(registry, &config.schema);

    match cli.command {
        Commands::List { filters, position, json } => {
            filters.apply(&mut session).unwrap_or_else(|e| fail(&e));
            commands::list(&session, position.coordinate(), json)?;
        }

        Commands::Nearest { filters, position, scope, top, json } => {
            filters.apply(&mut session).unwrap_or_else(|e| fail(&e));
            if let Some(scope) = scope {
                session = session.with_scope(scope.into());
            }
            commands::nearest(&mut session, position.coordinate(), top, json).await?;
        }

        Commands::Distance { lat1, lng1, lat2, lng2 } => {
            commands::distance(lat1, lng1, lat2, lng2)?;
        }

        Commands::Render { filters, position, focus } => {
            filters.apply(&mut session).unwrap_or_else(|e| fail(&e));
            commands::render(&mut session, position.coordinate(), focus.as_deref()).await?;
        }
    }

    Ok(())
}

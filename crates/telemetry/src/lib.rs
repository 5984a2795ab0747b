//! Structured logging for ambumap tools
//!
//! Installs a global `tracing` subscriber with an environment-aware filter and
//! tags the first event with a per-process session id for correlating logs.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize logging with defaults
pub fn init() -> anyhow::Result<()> {
    init_with_config(TelemetryConfig::default())
}

/// Initialize with custom configuration
///
/// `RUST_LOG` takes precedence over `config.log_level` when set. Fails if a
/// global subscriber is already installed.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = build_filter(&config)?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(fmt::layer().json().with_target(config.show_target).with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(config.show_target)
                    .with_file(config.show_file)
                    .with_line_number(config.show_line_number)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

fn build_filter(config: &TelemetryConfig) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", config.log_level, e)),
    }
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json: bool,
    pub show_target: bool,
    pub show_file: bool,
    pub show_line_number: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
            show_target: false,
            show_file: false,
            show_line_number: false,
        }
    }
}

impl TelemetryConfig {
    /// Config at the given level, other settings default.
    pub fn with_level(level: impl Into<String>) -> Self {
        Self { log_level: level.into(), ..Self::default() }
    }

    /// Switch to JSON lines output.
    #[must_use]
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

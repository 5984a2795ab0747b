//! Error handling with codes and recovery suggestions
//!
//! Two of these errors are guarded preconditions raised by the core itself
//! (`EmptyCandidateSet`, `UnknownStation`) and signal caller wiring bugs.
//! `LocationUnavailable` is passed through from the location provider.
//! The rest come from loading registries and configuration files.

use crate::location::LocationError;
use ambumap_geo::GeoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Lookup errors (1xxx)
    EmptyCandidateSet = 1001,
    UnknownStation = 1002,

    // Registry errors (2xxx)
    DuplicateStation = 2001,
    InvalidCoordinate = 2002,

    // Location errors (3xxx)
    LocationUnavailable = 3001,

    // Configuration errors (4xxx)
    ConfigError = 4000,
    ConfigParseError = 4001,
    IoError = 4002,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "Lookup",
            2 => "Registry",
            3 => "Location",
            4 => "Configuration",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type for the ambumap core.
#[derive(Debug, Error)]
pub enum Error {
    /// Nearest-station lookup over zero candidates
    #[error("No candidate stations to search")]
    EmptyCandidateSet,

    /// Station name or id absent from the registry
    #[error("Unknown station: {0}")]
    UnknownStation(String),

    /// The platform location query failed
    #[error("Location unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),

    /// Two registry records share a name
    #[error("Duplicate station name: {0}")]
    DuplicateStation(String),

    /// A registry record or reference center is outside valid ranges
    #[error("Invalid coordinate for {context}: {source}")]
    InvalidCoordinate {
        /// What the coordinate belongs to
        context: String,
        /// Underlying geo error
        #[source]
        source: GeoError,
    },

    /// Configuration is semantically invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// A TOML document failed to parse
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::EmptyCandidateSet => ErrorCode::EmptyCandidateSet,
            Error::UnknownStation(_) => ErrorCode::UnknownStation,
            Error::LocationUnavailable(_) => ErrorCode::LocationUnavailable,
            Error::DuplicateStation(_) => ErrorCode::DuplicateStation,
            Error::InvalidCoordinate { .. } => ErrorCode::InvalidCoordinate,
            Error::Config(_) => ErrorCode::ConfigError,
            Error::Toml(_) => ErrorCode::ConfigParseError,
            Error::Io { .. } => ErrorCode::IoError,
        }
    }

    /// Recovery suggestion to show alongside the message, if any.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::EmptyCandidateSet => {
                Some("Enable at least one filter or search across all stations")
            }
            Error::LocationUnavailable(_) => {
                Some("Check location permissions or pass a position explicitly")
            }
            Error::DuplicateStation(_) => Some("Give every station in the table a unique name"),
            Error::Toml(_) | Error::Config(_) => {
                Some("Fix the file or remove it to fall back to defaults")
            }
            _ => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
}

impl Error {
    /// Maps the error to a process exit code.
    pub fn exit_code(&self) -> i32 {
        match self.code().category() {
            "Configuration" => exit_codes::CONFIG_ERROR,
            "Registry" | "Lookup" => exit_codes::VALIDATION_ERROR,
            _ => exit_codes::FAILURE,
        }
    }
}

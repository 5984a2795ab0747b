//! User location boundary
//!
//! A location query resolves exactly once per call, either to a coordinate or
//! to a [`LocationError`]. The core does not interpret failures beyond "it
//! failed" and imposes no timeout of its own; that is the provider's business.

use ambumap_geo::Coordinate;
use std::future::Future;
use thiserror::Error;

/// Why a location query failed, as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user refused location access
    #[error("permission denied")]
    PermissionDenied,
    /// The platform gave up waiting for a fix
    #[error("timed out")]
    Timeout,
    /// No position could be determined
    #[error("position unavailable")]
    PositionUnavailable,
    /// The platform has no location service
    #[error("geolocation is not supported on this platform")]
    Unsupported,
    /// Any other platform-specific reason
    #[error("{0}")]
    Other(String),
}

/// Source of the user's current position.
pub trait LocationProvider {
    /// Resolves the current position once.
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, LocationError>> + Send;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub Coordinate);

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, LocationError>> + Send {
        let position = self.0;
        async move { Ok(position) }
    }
}

/// Always fails with the given reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoLocation(pub LocationError);

impl LocationProvider for NoLocation {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, LocationError>> + Send {
        let reason = self.0.clone();
        async move { Err(reason) }
    }
}

/// Queries `provider` and rejects coordinates outside valid ranges.
pub async fn request_position<P>(provider: &P) -> Result<Coordinate, LocationError>
where
    P: LocationProvider,
{
    let position = provider.current_position().await?;
    if position.is_valid() {
        tracing::debug!(%position, "Location resolved");
        Ok(position)
    } else {
        tracing::warn!(?position, "Provider returned an out-of-range position");
        Err(LocationError::PositionUnavailable)
    }
}

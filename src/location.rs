use async_trait::async_trait;

use crate::error::LocationError;
use crate::geo::Coordinate;

/// Asynchronous source of the user's current position.
///
/// One outstanding request per `acquire` call, no internal retry and no
/// internal timeout; retry policy belongs to the caller.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn acquire(&self) -> Result<Coordinate, LocationError>;
}

/// Provider backed by a coordinate supplied through configuration, for
/// deployments without a live position source.
pub struct FixedLocationProvider {
    coordinate: Coordinate,
}

impl FixedLocationProvider {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn acquire(&self) -> Result<Coordinate, LocationError> {
        Ok(self.coordinate)
    }
}

/// Provider for platforms with no position source at all.
pub struct NoopLocationProvider;

#[async_trait]
impl LocationProvider for NoopLocationProvider {
    async fn acquire(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unsupported)
    }
}

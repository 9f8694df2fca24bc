use async_trait::async_trait;

use crate::location_tracker::Location;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeError {
    #[error("no placemark found for `{0}`")]
    NotFound(String),
}

/// Forward and reverse geocoding, backed by the platform geocoder.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves an address to the location of its first placemark.
    async fn forward(&self, address: &str) -> Result<Location, GeocodeError>;

    /// Resolves a location to the name of its first placemark.
    async fn reverse(&self, location: Location) -> Result<String, GeocodeError>;
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::location_tracker::Location;

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    #[default]
    Automobile,
    Walking,
    Transit,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteOption {
    pub name: String,
    // seconds
    pub expected_travel_time: f64,
    pub distance_meters: f64,
    pub path: Vec<Location>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub origin: Location,
    pub destination: Location,
    pub transport_type: TransportType,
    pub requests_alternate_routes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no route found")]
    NoRoutes,
    #[error("route request failed: {0}")]
    Failed(String),
}

/// Directions provider, backed by the platform mapping service.
#[async_trait]
pub trait Router: Send + Sync {
    async fn route(&self, request: RouteRequest) -> Result<Vec<RouteOption>, RouteError>;
}

use serde::{Deserialize, Serialize};

use crate::renderer::map_renderer::{MapType, PolylineStyle};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleResultPolicy {
    /// Only the most recently issued `plan_route` may commit its results.
    #[default]
    Discard,
    /// Whatever completes last wins, even if a newer request was issued.
    Commit,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgePadding {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgePadding {
    pub fn uniform(value: f64) -> Self {
        EdgePadding {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }
}

impl Default for EdgePadding {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    pub follow_span_km: f64,
    pub clear_route_on_follow: bool,
    pub fit_padding: EdgePadding,
    pub polyline_style: PolylineStyle,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        PresenterConfig {
            follow_span_km: 1.0,
            clear_route_on_follow: true,
            fit_padding: EdgePadding::default(),
            polyline_style: PolylineStyle::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub requests_alternate_routes: bool,
    pub stale_results: StaleResultPolicy,
    /// Origin title used when the current location cannot be reverse geocoded.
    pub default_origin_name: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        CoordinatorConfig {
            requests_alternate_routes: true,
            stale_results: StaleResultPolicy::default(),
            default_origin_name: "Current Location".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    pub map_type: MapType,
    pub presenter: PresenterConfig,
    pub coordinator: CoordinatorConfig,
}

impl NavigatorConfig {
    /// Missing fields take their defaults. A config that cannot be parsed at
    /// all is logged and replaced by the default one.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(error) => {
                warn!("[config.from_json] invalid config, using defaults: {}", error);
                NavigatorConfig::default()
            }
        }
    }
}

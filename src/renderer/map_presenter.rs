//! Decides what the map should display. Everything here is a pure function of
//! its input, the result is recomputed whenever any input changes.

use serde::{Deserialize, Serialize};

use super::map_renderer::PolylineStyle;
use crate::config::{EdgePadding, PresenterConfig};
use crate::location_tracker::Location;
use crate::route_coordinator::Annotation;
use crate::router::RouteOption;
use crate::utils;

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    #[default]
    Following,
    ShowingRoute,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CoordinateSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polyline {
    pub path: Vec<Location>,
    pub style: PolylineStyle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FitBounds {
    pub south_west: Location,
    pub north_east: Location,
    pub padding: EdgePadding,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenderInstruction {
    FollowUser {
        center: Location,
        span: CoordinateSpan,
        clear_all_pins: bool,
        clear_all_overlays: bool,
    },
    ShowRoute {
        clear_all_pins: bool,
        pins: Vec<Annotation>,
        clear_all_overlays: bool,
        polyline: Option<Polyline>,
        fit_bounds: Option<FitBounds>,
    },
}

impl RenderInstruction {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub struct PresenterInput<'a> {
    pub tracking_mode: TrackingMode,
    pub current_location: Location,
    pub annotations: &'a [Annotation],
    pub selected_route: Option<&'a RouteOption>,
}

pub fn present(input: &PresenterInput, config: &PresenterConfig) -> RenderInstruction {
    match input.tracking_mode {
        TrackingMode::Following => {
            let delta = utils::km_to_degrees(config.follow_span_km);
            // Pins and the route overlay from a previous selection are only
            // removed when configured to, otherwise they stay on the map.
            RenderInstruction::FollowUser {
                center: input.current_location,
                span: CoordinateSpan {
                    latitude_delta: delta,
                    longitude_delta: delta,
                },
                clear_all_pins: config.clear_route_on_follow,
                clear_all_overlays: config.clear_route_on_follow,
            }
        }
        TrackingMode::ShowingRoute => {
            let polyline = input.selected_route.map(|route| Polyline {
                path: route.path.clone(),
                style: config.polyline_style.clone(),
            });
            let fit_bounds = input
                .selected_route
                .and_then(|route| utils::bounding_rect(&route.path))
                .map(|rect| FitBounds {
                    south_west: rect.min().into(),
                    north_east: rect.max().into(),
                    padding: config.fit_padding.clone(),
                });
            RenderInstruction::ShowRoute {
                clear_all_pins: true,
                pins: input.annotations.to_vec(),
                clear_all_overlays: true,
                polyline,
                fit_bounds,
            }
        }
    }
}

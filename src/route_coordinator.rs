use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

use crate::config::{CoordinatorConfig, StaleResultPolicy};
use crate::geocoder::{GeocodeError, Geocoder};
use crate::location_tracker::Location;
use crate::router::{RouteError, RouteOption, RouteRequest, Router, TransportType};
use crate::utils;

pub const ALERT_MESSAGE: &str = "Please, check if locations are entered/correct.";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub coordinate: Location,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

impl Annotation {
    fn pin(coordinate: Location, text: &str) -> Self {
        Annotation {
            coordinate,
            title: Some(text.to_string()),
            subtitle: Some(text.to_string()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AddressField {
    Start,
    Destination,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("could not resolve the {field} address")]
    Geocode {
        field: AddressField,
        #[source]
        source: GeocodeError,
    },
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("superseded by a newer route request")]
    Superseded,
    #[error("no route option at index {0}")]
    NoSuchRoute(usize),
}

impl PlanError {
    /// Every user facing failure maps to the same alert. A superseded request
    /// is not the user's problem, nothing is shown for it.
    pub fn alert_message(&self) -> Option<&'static str> {
        match self {
            PlanError::Superseded => None,
            _ => Some(ALERT_MESSAGE),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteCoordinatorState {
    pub session_id: Uuid,
    pub start_text: String,
    pub destination_text: String,
    pub annotations: Vec<Annotation>,
    pub route_options: Vec<RouteOption>,
    pub selected_route: Option<RouteOption>,
    /// Generation of the request whose results are currently shown.
    pub generation: u64,
}

impl RouteCoordinatorState {
    fn new() -> Self {
        RouteCoordinatorState {
            session_id: Uuid::new_v4(),
            start_text: String::new(),
            destination_text: String::new(),
            annotations: Vec::new(),
            route_options: Vec::new(),
            selected_route: None,
            generation: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoutePlan {
    pub annotations: Vec<Annotation>,
    pub route_options: Vec<RouteOption>,
}

/// What the route screen hands back to the map screen once the user picks a
/// route.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSelection {
    pub annotations: Vec<Annotation>,
    pub route: RouteOption,
}

pub fn route_summary(route: &RouteOption) -> String {
    format!(
        "via {}: {}, {}",
        route.name,
        utils::format_distance(route.distance_meters),
        utils::format_travel_time(route.expected_travel_time)
    )
}

/// One route planning session, i.e. one visit to the route screen.
pub struct RouteCoordinator {
    geocoder: Arc<dyn Geocoder>,
    router: Arc<dyn Router>,
    config: CoordinatorConfig,
    state: watch::Sender<RouteCoordinatorState>,
    generation: AtomicU64,
}

impl RouteCoordinator {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn Router>,
        config: CoordinatorConfig,
    ) -> Self {
        let state = RouteCoordinatorState::new();
        debug!("new route session {}", state.session_id);
        RouteCoordinator {
            geocoder,
            router,
            config,
            state: watch::Sender::new(state),
            generation: AtomicU64::new(0),
        }
    }

    /// Seeds the session with the selection made in a previous one, so
    /// reopening the route screen shows what is currently on the map.
    pub fn with_selection(self, selection: RouteSelection) -> Self {
        self.state.send_modify(|state| {
            state.annotations = selection.annotations;
            state.selected_route = Some(selection.route);
        });
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.state.borrow().session_id
    }

    pub fn state(&self) -> RouteCoordinatorState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RouteCoordinatorState> {
        self.state.subscribe()
    }

    pub fn route_summaries(&self) -> Vec<String> {
        self.state
            .borrow()
            .route_options
            .iter()
            .map(route_summary)
            .collect()
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.config.stale_results == StaleResultPolicy::Discard
            && self.generation.load(Ordering::SeqCst) != generation
    }

    /// Applies `f` unless the request was superseded. Leaves
    /// `state.generation` alone, see `commit`.
    fn update<F>(&self, generation: u64, f: F) -> Result<(), PlanError>
    where
        F: FnOnce(&mut RouteCoordinatorState),
    {
        let updated = self.state.send_if_modified(|state| {
            if self.is_stale(generation) {
                return false;
            }
            f(state);
            true
        });
        if updated {
            Ok(())
        } else {
            debug!("dropping results of superseded route request #{}", generation);
            Err(PlanError::Superseded)
        }
    }

    /// Like `update`, and marks the results of `generation` as the shown ones.
    fn commit<F>(&self, generation: u64, f: F) -> Result<(), PlanError>
    where
        F: FnOnce(&mut RouteCoordinatorState),
    {
        self.update(generation, move |state| {
            state.generation = generation;
            f(state);
        })
    }

    /// A failure of a superseded request is not reported as such.
    fn check_stale(&self, generation: u64, error: PlanError) -> PlanError {
        if self.is_stale(generation) {
            debug!("dropping failure of superseded route request #{}", generation);
            PlanError::Superseded
        } else {
            error
        }
    }

    async fn forward(&self, address: &str, field: AddressField) -> Result<Location, PlanError> {
        self.geocoder.forward(address).await.map_err(|source| {
            warn!("[route_coordinator.forward] {}: {}", field, source);
            PlanError::Geocode { field, source }
        })
    }

    /// Resolves both addresses and requests routes between them. An empty
    /// `start` means "from `current_location`".
    ///
    /// Annotations are only replaced once both addresses resolved, route
    /// options once the router answered. The destination is never looked up
    /// before the start address resolved.
    pub async fn plan_route(
        &self,
        start: &str,
        destination: &str,
        current_location: Location,
    ) -> Result<RoutePlan, PlanError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "[{}] planning route #{} to `{}`",
            self.session_id(),
            generation,
            destination
        );
        self.state.send_modify(|state| {
            state.start_text = start.to_string();
            state.destination_text = destination.to_string();
        });

        let (origin, origin_name, destination_location) = if start.trim().is_empty() {
            let (destination_location, placemark) = tokio::join!(
                self.forward(destination, AddressField::Destination),
                self.geocoder.reverse(current_location)
            );
            let origin_name = placemark.unwrap_or_else(|error| {
                debug!("reverse geocoding the current location failed: {}", error);
                self.config.default_origin_name.clone()
            });
            {
                let origin_name = origin_name.clone();
                self.update(generation, move |state| state.start_text = origin_name)?;
            }
            let destination_location = destination_location?;
            (current_location, origin_name, destination_location)
        } else {
            let origin = self
                .forward(start, AddressField::Start)
                .await
                .map_err(|e| self.check_stale(generation, e))?;
            let destination_location = self
                .forward(destination, AddressField::Destination)
                .await
                .map_err(|e| self.check_stale(generation, e))?;
            (origin, start.to_string(), destination_location)
        };

        let annotations = vec![
            Annotation::pin(origin, &origin_name),
            Annotation::pin(destination_location, destination),
        ];
        {
            let annotations = annotations.clone();
            self.commit(generation, move |state| {
                state.annotations = annotations;
                state.route_options.clear();
                state.selected_route = None;
            })?;
        }

        let request = RouteRequest {
            origin,
            destination: destination_location,
            transport_type: TransportType::Automobile,
            requests_alternate_routes: self.config.requests_alternate_routes,
        };
        let route_options = match self.router.route(request).await {
            Ok(routes) if routes.is_empty() => Err(RouteError::NoRoutes),
            result => result,
        };
        let route_options = route_options.map_err(|error| {
            warn!("[route_coordinator.plan_route] {}", error);
            self.check_stale(generation, error.into())
        })?;

        {
            let route_options = route_options.clone();
            self.commit(generation, move |state| state.route_options = route_options)?;
        }
        info!(
            "[{}] route #{} resolved with {} option(s)",
            self.session_id(),
            generation,
            route_options.len()
        );
        Ok(RoutePlan {
            annotations,
            route_options,
        })
    }

    pub fn select_route(&self, index: usize) -> Result<RouteSelection, PlanError> {
        let mut selection = None;
        self.state.send_if_modified(|state| match state.route_options.get(index) {
            Some(route) => {
                state.selected_route = Some(route.clone());
                selection = Some(RouteSelection {
                    annotations: state.annotations.clone(),
                    route: route.clone(),
                });
                true
            }
            None => false,
        });
        selection.ok_or(PlanError::NoSuchRoute(index))
    }
}

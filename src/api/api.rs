use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use anyhow::{Context, Result};
use flutter_rust_bridge::frb;

use crate::config::NavigatorConfig;
use crate::geocoder::Geocoder;
use crate::location_tracker::{Location, LocationService, LocationTracker};
use crate::logs;
use crate::navigator::Navigator;
use crate::renderer::map_renderer::MapType;
use crate::renderer::MapRenderer;
use crate::route_coordinator::{PlanError, RouteCoordinator};
use crate::router::Router;

/// The platform side collaborators, implemented by the host app.
#[frb(ignore)]
pub struct Platform {
    pub location_service: Box<dyn LocationService>,
    pub geocoder: Arc<dyn Geocoder>,
    pub router: Arc<dyn Router>,
}

struct MainState {
    cache_dir: String,
    navigator: Mutex<Navigator>,
    // `None` while the route screen is not open
    route_session: Mutex<Option<Arc<RouteCoordinator>>>,
    geocoder: Arc<dyn Geocoder>,
    router: Arc<dyn Router>,
}

static MAIN_STATE: OnceLock<MainState> = OnceLock::new();

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn get() -> Result<&'static MainState> {
    MAIN_STATE
        .get()
        .ok_or_else(|| anyhow!("main state is not initialized"))
}

/// Sets up logging and the global state, then starts location tracking.
/// Calling it again is a no-op. A logging failure is not fatal, the core
/// works without a log file.
#[frb(ignore)]
pub fn init(cache_dir: String, config_json: Option<String>, platform: Platform) {
    let mut already_initialized = true;
    MAIN_STATE.get_or_init(|| {
        already_initialized = false;

        if let Err(e) = logs::init(&cache_dir) {
            warn!("file logging is not available: {:?}", e);
        }

        let config = config_json
            .as_deref()
            .map(NavigatorConfig::from_json)
            .unwrap_or_default();
        let mut navigator = Navigator::new(LocationTracker::new(platform.location_service), config);
        navigator.start_tracking();
        info!("initialized");

        MainState {
            cache_dir,
            navigator: Mutex::new(navigator),
            route_session: Mutex::new(None),
            geocoder: platform.geocoder,
            router: platform.router,
        }
    });
    if already_initialized {
        warn!("`init` is called multiple times");
    }
}

#[frb(ignore)]
pub fn set_map_renderer(renderer: Box<dyn MapRenderer>) -> Result<()> {
    lock(&get()?.navigator).set_renderer(renderer);
    Ok(())
}

#[frb(sync)]
pub fn on_location_update(latitude: f64, longitude: f64) -> Result<()> {
    lock(&get()?.navigator).on_location_update(Location::new(latitude, longitude));
    Ok(())
}

#[frb(sync)]
pub fn start_tracking() -> Result<()> {
    lock(&get()?.navigator).start_tracking();
    Ok(())
}

#[frb(sync)]
pub fn stop_tracking() -> Result<()> {
    lock(&get()?.navigator).stop_tracking();
    Ok(())
}

#[frb(sync)]
pub fn is_tracking() -> Result<bool> {
    Ok(lock(&get()?.navigator).tracker().is_tracking())
}

/// `false` means the user denied location access or location services are
/// off. There is no alert for it, the map just never moves.
#[frb(sync)]
pub fn is_location_enabled() -> Result<bool> {
    Ok(lock(&get()?.navigator).tracker().is_enabled())
}

/// Opens a route screen session, seeded with what is currently on the map.
#[frb(sync)]
pub fn new_route_session() -> Result<()> {
    let state = get()?;
    let (selection, config) = {
        let navigator = lock(&state.navigator);
        (
            navigator.current_selection(),
            navigator.config().coordinator.clone(),
        )
    };
    let mut coordinator =
        RouteCoordinator::new(state.geocoder.clone(), state.router.clone(), config);
    if let Some(selection) = selection {
        coordinator = coordinator.with_selection(selection);
    }
    *lock(&state.route_session) = Some(Arc::new(coordinator));
    Ok(())
}

#[frb(sync)]
pub fn end_route_session() -> Result<()> {
    *lock(&get()?.route_session) = None;
    Ok(())
}

fn route_session() -> Result<Arc<RouteCoordinator>> {
    lock(&get()?.route_session)
        .clone()
        .ok_or_else(|| anyhow!("no route session"))
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanRouteOutcome {
    Routes(Vec<String>),
    Alert(String),
    /// A newer request was issued before this one finished.
    Superseded,
}

pub async fn plan_route(start: String, destination: String) -> Result<PlanRouteOutcome> {
    let coordinator = route_session()?;
    let current_location = lock(&get()?.navigator).tracker().current();
    let outcome = match coordinator
        .plan_route(&start, &destination, current_location)
        .await
    {
        Ok(_) => PlanRouteOutcome::Routes(coordinator.route_summaries()),
        Err(PlanError::Superseded) => PlanRouteOutcome::Superseded,
        Err(error) => {
            info!("route planning failed: {}", error);
            PlanRouteOutcome::Alert(error.alert_message().unwrap_or_default().to_string())
        }
    };
    Ok(outcome)
}

#[frb(sync)]
pub fn route_summaries() -> Result<Vec<String>> {
    Ok(route_session()?.route_summaries())
}

/// The route entered text after planning, the start may have been replaced
/// by the name of the current location.
#[frb(sync)]
pub fn route_session_texts() -> Result<(String, String)> {
    let state = route_session()?.state();
    Ok((state.start_text, state.destination_text))
}

#[frb(sync)]
pub fn select_route(index: usize) -> Result<()> {
    let coordinator = route_session()?;
    lock(&get()?.navigator).select_route(&coordinator, index)?;
    Ok(())
}

#[frb(sync)]
pub fn resume_following() -> Result<()> {
    lock(&get()?.navigator).resume_following();
    Ok(())
}

#[frb(sync)]
pub fn set_map_type(map_type: String) -> Result<()> {
    let map_type =
        MapType::from_str(&map_type).with_context(|| format!("unknown map type `{map_type}`"))?;
    lock(&get()?.navigator).set_map_type(map_type);
    Ok(())
}

#[frb(sync)]
pub fn render_instruction_json() -> Result<String> {
    let instruction = lock(&get()?.navigator).render_instruction();
    Ok(instruction.to_json()?)
}

pub fn export_logs(target_file_path: String) -> Result<()> {
    logs::export(&get()?.cache_dir, &target_file_path)
}

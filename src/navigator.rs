use crate::config::NavigatorConfig;
use crate::location_tracker::{Location, LocationTracker};
use crate::renderer::map_presenter::{self, PresenterInput, TrackingMode};
use crate::renderer::map_renderer::MapType;
use crate::renderer::{MapRenderer, RenderInstruction};
use crate::route_coordinator::{Annotation, PlanError, RouteCoordinator, RouteSelection};
use crate::router::RouteOption;

/// State behind the map screen. Every mutation re-presents the map and
/// pushes the result to the registered renderer if it changed.
pub struct Navigator {
    tracker: LocationTracker,
    config: NavigatorConfig,
    tracking_mode: TrackingMode,
    annotations: Vec<Annotation>,
    selected_route: Option<RouteOption>,
    map_type: MapType,
    renderer: Option<Box<dyn MapRenderer>>,
    last_rendered: Option<RenderInstruction>,
}

impl Navigator {
    pub fn new(tracker: LocationTracker, config: NavigatorConfig) -> Self {
        Navigator {
            tracker,
            map_type: config.map_type,
            config,
            tracking_mode: TrackingMode::Following,
            annotations: Vec::new(),
            selected_route: None,
            renderer: None,
            last_rendered: None,
        }
    }

    pub fn tracker(&self) -> &LocationTracker {
        &self.tracker
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn tracking_mode(&self) -> TrackingMode {
        self.tracking_mode
    }

    pub fn map_type(&self) -> MapType {
        self.map_type
    }

    /// The selection currently on the map, if any. Used to seed the next
    /// route planning session.
    pub fn current_selection(&self) -> Option<RouteSelection> {
        self.selected_route.as_ref().map(|route| RouteSelection {
            annotations: self.annotations.clone(),
            route: route.clone(),
        })
    }

    pub fn set_renderer(&mut self, mut renderer: Box<dyn MapRenderer>) {
        renderer.set_map_type(self.map_type);
        let instruction = self.render_instruction();
        renderer.render(&instruction);
        self.renderer = Some(renderer);
        self.last_rendered = Some(instruction);
    }

    pub fn render_instruction(&self) -> RenderInstruction {
        let input = PresenterInput {
            tracking_mode: self.tracking_mode,
            current_location: self.tracker.current(),
            annotations: &self.annotations,
            selected_route: self.selected_route.as_ref(),
        };
        map_presenter::present(&input, &self.config.presenter)
    }

    fn refresh(&mut self) {
        let instruction = self.render_instruction();
        if self.last_rendered.as_ref() == Some(&instruction) {
            // same, nothing to do
            return;
        }
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(&instruction);
        }
        self.last_rendered = Some(instruction);
    }

    pub fn start_tracking(&mut self) {
        self.tracker.start();
        self.refresh();
    }

    pub fn stop_tracking(&mut self) {
        self.tracker.stop();
    }

    pub fn on_location_update(&mut self, location: Location) {
        self.tracker.on_update(location);
        if self.tracking_mode == TrackingMode::Following {
            self.refresh();
        }
    }

    /// The only way into `ShowingRoute`.
    pub fn select_route(
        &mut self,
        coordinator: &RouteCoordinator,
        index: usize,
    ) -> Result<(), PlanError> {
        let selection = coordinator.select_route(index)?;
        info!("showing route `{}`", selection.route.name);
        self.annotations = selection.annotations;
        self.selected_route = Some(selection.route);
        self.tracking_mode = TrackingMode::ShowingRoute;
        self.refresh();
        Ok(())
    }

    pub fn resume_following(&mut self) {
        if !self.tracker.is_tracking() {
            self.tracker.start();
        }
        self.tracking_mode = TrackingMode::Following;
        if self.config.presenter.clear_route_on_follow {
            self.annotations.clear();
            self.selected_route = None;
        }
        self.refresh();
    }

    pub fn set_map_type(&mut self, map_type: MapType) {
        if self.map_type == map_type {
            return;
        }
        self.map_type = map_type;
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_map_type(map_type);
        }
    }
}

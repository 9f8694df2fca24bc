pub mod test_utils;

use std::sync::Arc;

use navigator_core::config::{NavigatorConfig, PresenterConfig};
use navigator_core::location_tracker::{Location, LocationTracker};
use navigator_core::navigator::Navigator;
use navigator_core::renderer::map_presenter::TrackingMode;
use navigator_core::renderer::map_renderer::MapType;
use navigator_core::renderer::RenderInstruction;
use navigator_core::route_coordinator::{PlanError, RouteCoordinator};
use test_utils::*;

fn navigator(config: NavigatorConfig) -> Navigator {
    init_logging();
    let (service, _) = FakeLocationService::new(true);
    let mut navigator = Navigator::new(LocationTracker::new(Box::new(service)), config);
    navigator.start_tracking();
    navigator
}

async fn planned_session() -> RouteCoordinator {
    let geocoder = FakeGeocoder::new()
        .with_address("Sheridan College", SHERIDAN)
        .with_address("Toronto", TORONTO);
    let coordinator = RouteCoordinator::new(
        Arc::new(geocoder),
        Arc::new(FakeRouter::new(&["QEW", "Hwy 403"])),
        Default::default(),
    );
    coordinator
        .plan_route("Sheridan College", "Toronto", Location::default())
        .await
        .unwrap();
    coordinator
}

#[test]
fn follows_location_updates() {
    let mut navigator = navigator(NavigatorConfig::default());
    let (renderer, rendered) = RecordingRenderer::new();
    navigator.set_renderer(Box::new(renderer));

    navigator.on_location_update(SHERIDAN);
    navigator.on_location_update(SHERIDAN);
    navigator.on_location_update(TORONTO);

    let rendered = rendered.lock().unwrap();
    assert_eq!(rendered.map_types, vec![MapType::Satellite]);
    // initial one, then one per distinct location
    assert_eq!(rendered.instructions.len(), 3);
    match rendered.instructions.last().unwrap() {
        RenderInstruction::FollowUser { center, .. } => assert_eq!(*center, TORONTO),
        other => panic!("unexpected instruction: {other:?}"),
    }
}

#[tokio::test]
async fn selecting_a_route_shows_it() {
    let coordinator = planned_session().await;
    let mut navigator = navigator(NavigatorConfig::default());
    let (renderer, rendered) = RecordingRenderer::new();
    navigator.set_renderer(Box::new(renderer));

    navigator.select_route(&coordinator, 1).unwrap();
    assert_eq!(navigator.tracking_mode(), TrackingMode::ShowingRoute);

    let route = coordinator.state().route_options[1].clone();
    let annotations = coordinator.state().annotations;
    match navigator.render_instruction() {
        RenderInstruction::ShowRoute {
            clear_all_pins,
            pins,
            clear_all_overlays,
            polyline,
            fit_bounds,
        } => {
            assert!(clear_all_pins);
            assert!(clear_all_overlays);
            assert_eq!(pins.len(), 2);
            assert_eq!(pins, annotations);
            assert_eq!(polyline.unwrap().path, route.path);
            assert!(fit_bounds.is_some());
        }
        other => panic!("unexpected instruction: {other:?}"),
    }
    assert_eq!(
        rendered.lock().unwrap().instructions.last(),
        Some(&navigator.render_instruction())
    );

    // location updates don't move the map while a route is shown
    let count = rendered.lock().unwrap().instructions.len();
    navigator.on_location_update(MISSISSAUGA);
    assert_eq!(rendered.lock().unwrap().instructions.len(), count);
}

#[tokio::test]
async fn bad_index_keeps_following() {
    let coordinator = planned_session().await;
    let mut navigator = navigator(NavigatorConfig::default());
    assert_eq!(
        navigator.select_route(&coordinator, 5),
        Err(PlanError::NoSuchRoute(5))
    );
    assert_eq!(navigator.tracking_mode(), TrackingMode::Following);
    assert!(navigator.current_selection().is_none());
}

#[tokio::test]
async fn resume_following_clears_route() {
    let coordinator = planned_session().await;
    let mut navigator = navigator(NavigatorConfig::default());
    navigator.select_route(&coordinator, 0).unwrap();
    navigator.stop_tracking();

    navigator.resume_following();
    assert_eq!(navigator.tracking_mode(), TrackingMode::Following);
    assert!(navigator.tracker().is_tracking());
    assert!(navigator.current_selection().is_none());
    assert!(matches!(
        navigator.render_instruction(),
        RenderInstruction::FollowUser {
            clear_all_pins: true,
            clear_all_overlays: true,
            ..
        }
    ));
}

#[tokio::test]
async fn resume_following_can_keep_route() {
    let coordinator = planned_session().await;
    let config = NavigatorConfig {
        presenter: PresenterConfig {
            clear_route_on_follow: false,
            ..PresenterConfig::default()
        },
        ..NavigatorConfig::default()
    };
    let mut navigator = navigator(config);
    navigator.select_route(&coordinator, 0).unwrap();

    navigator.resume_following();
    let selection = navigator.current_selection().unwrap();
    assert_eq!(selection.route, coordinator.state().route_options[0]);
    assert!(matches!(
        navigator.render_instruction(),
        RenderInstruction::FollowUser {
            clear_all_pins: false,
            clear_all_overlays: false,
            ..
        }
    ));
}

#[test]
fn map_type_changes_reach_renderer() {
    let mut navigator = navigator(NavigatorConfig::default());
    let (renderer, rendered) = RecordingRenderer::new();
    navigator.set_renderer(Box::new(renderer));

    navigator.set_map_type(MapType::Hybrid);
    navigator.set_map_type(MapType::Hybrid);
    navigator.set_map_type(MapType::Standard);

    assert_eq!(navigator.map_type(), MapType::Standard);
    assert_eq!(
        rendered.lock().unwrap().map_types,
        vec![MapType::Satellite, MapType::Hybrid, MapType::Standard]
    );
}

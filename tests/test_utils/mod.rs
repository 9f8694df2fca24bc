#![allow(dead_code)]

use async_trait::async_trait;
use navigator_core::geocoder::{GeocodeError, Geocoder};
use navigator_core::location_tracker::{Location, LocationService};
use navigator_core::renderer::map_renderer::MapType;
use navigator_core::renderer::{MapRenderer, RenderInstruction};
use navigator_core::router::{RouteError, RouteOption, RouteRequest, Router};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

pub const SHERIDAN: Location = Location {
    latitude: 43.4691,
    longitude: -79.6989,
};
pub const TORONTO: Location = Location {
    latitude: 43.6532,
    longitude: -79.3832,
};
pub const MISSISSAUGA: Location = Location {
    latitude: 43.5890,
    longitude: -79.6441,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Geocoder backed by a fixed address book. Lookups of gated addresses block
/// until the test releases them.
#[derive(Default)]
pub struct FakeGeocoder {
    addresses: HashMap<String, Location>,
    placemark: Option<String>,
    forward_calls: Mutex<Vec<String>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    entered: Mutex<Option<mpsc::UnboundedSender<String>>>,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address(mut self, address: &str, location: Location) -> Self {
        self.addresses.insert(address.to_string(), location);
        self
    }

    pub fn with_placemark(mut self, name: &str) -> Self {
        self.placemark = Some(name.to_string());
        self
    }

    /// Returns the sender that lets a lookup of `address` finish.
    pub fn gate(&self, address: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(address.to_string(), rx);
        tx
    }

    /// Reports every address as soon as its lookup starts.
    pub fn watch_entered(&self) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.entered.lock().unwrap() = Some(tx);
        rx
    }

    pub fn forward_calls(&self) -> Vec<String> {
        self.forward_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn forward(&self, address: &str) -> Result<Location, GeocodeError> {
        self.forward_calls.lock().unwrap().push(address.to_string());
        if let Some(entered) = self.entered.lock().unwrap().as_ref() {
            let _ = entered.send(address.to_string());
        }
        let gate = self.gates.lock().unwrap().remove(address);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.addresses
            .get(address)
            .copied()
            .ok_or_else(|| GeocodeError::NotFound(address.to_string()))
    }

    async fn reverse(&self, location: Location) -> Result<String, GeocodeError> {
        self.placemark
            .clone()
            .ok_or_else(|| GeocodeError::NotFound(format!("{location:?}")))
    }
}

pub fn route_between(name: &str, origin: Location, destination: Location) -> RouteOption {
    RouteOption {
        name: name.to_string(),
        expected_travel_time: 1800.0,
        distance_meters: 35000.0,
        path: vec![origin, MISSISSAUGA, destination],
    }
}

/// Answers every request with one route per configured name, or fails.
pub struct FakeRouter {
    names: Vec<String>,
    error: Option<RouteError>,
    requests: Mutex<Vec<RouteRequest>>,
}

impl FakeRouter {
    pub fn new(names: &[&str]) -> Self {
        FakeRouter {
            names: names.iter().map(|n| n.to_string()).collect(),
            error: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: RouteError) -> Self {
        FakeRouter {
            names: Vec::new(),
            error: Some(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Router for FakeRouter {
    async fn route(&self, request: RouteRequest) -> Result<Vec<RouteOption>, RouteError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self
            .names
            .iter()
            .map(|name| route_between(name, request.origin, request.destination))
            .collect())
    }
}

#[derive(Default, Debug)]
pub struct ServiceCalls {
    pub permission_requests: usize,
    pub starts: usize,
    pub stops: usize,
}

pub struct FakeLocationService {
    pub permission: bool,
    pub enabled: bool,
    pub calls: Arc<Mutex<ServiceCalls>>,
}

impl FakeLocationService {
    pub fn new(permission: bool) -> (Self, Arc<Mutex<ServiceCalls>>) {
        let calls = Arc::new(Mutex::new(ServiceCalls::default()));
        (
            FakeLocationService {
                permission,
                enabled: true,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

impl LocationService for FakeLocationService {
    fn request_permission(&mut self) -> bool {
        self.calls.lock().unwrap().permission_requests += 1;
        self.permission
    }

    fn services_enabled(&self) -> bool {
        self.enabled
    }

    fn start_updates(&mut self) {
        self.calls.lock().unwrap().starts += 1;
    }

    fn stop_updates(&mut self) {
        self.calls.lock().unwrap().stops += 1;
    }
}

#[derive(Default)]
pub struct Rendered {
    pub instructions: Vec<RenderInstruction>,
    pub map_types: Vec<MapType>,
}

pub struct RecordingRenderer {
    pub rendered: Arc<Mutex<Rendered>>,
}

impl RecordingRenderer {
    pub fn new() -> (Self, Arc<Mutex<Rendered>>) {
        let rendered = Arc::new(Mutex::new(Rendered::default()));
        (
            RecordingRenderer {
                rendered: rendered.clone(),
            },
            rendered,
        )
    }
}

impl MapRenderer for RecordingRenderer {
    fn render(&mut self, instruction: &RenderInstruction) {
        self.rendered
            .lock()
            .unwrap()
            .instructions
            .push(instruction.clone());
    }

    fn set_map_type(&mut self, map_type: MapType) {
        self.rendered.lock().unwrap().map_types.push(map_type);
    }
}

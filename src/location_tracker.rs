use chrono::{DateTime, Utc};
use geo_types::Coord;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude,
            longitude,
        }
    }
}

impl From<Location> for Coord<f64> {
    fn from(location: Location) -> Self {
        Coord {
            x: location.longitude,
            y: location.latitude,
        }
    }
}

impl From<Coord<f64>> for Location {
    fn from(coord: Coord<f64>) -> Self {
        Location {
            latitude: coord.y,
            longitude: coord.x,
        }
    }
}

/// The platform location service. Fixes are not returned from here, the
/// platform pushes them into `LocationTracker::on_update`.
pub trait LocationService: Send {
    /// Returns `true` if the user granted (at least when-in-use) access.
    fn request_permission(&mut self) -> bool;
    fn services_enabled(&self) -> bool;
    fn start_updates(&mut self);
    fn stop_updates(&mut self);
}

pub trait LocationObserver: Send {
    fn on_location(&mut self, location: &Location);
}

pub struct LocationTracker {
    service: Box<dyn LocationService>,
    observer: Option<Box<dyn LocationObserver>>,
    current: Location,
    last_fix_at: Option<DateTime<Utc>>,
    enabled: bool,
    tracking: bool,
}

impl LocationTracker {
    pub fn new(service: Box<dyn LocationService>) -> Self {
        LocationTracker {
            service,
            observer: None,
            current: Location::default(),
            last_fix_at: None,
            enabled: false,
            tracking: false,
        }
    }

    /// Asks for permission and starts updates. Denied permission or disabled
    /// location services leave the tracker disabled, there is nothing the UI
    /// could do about it so no error is returned.
    pub fn start(&mut self) {
        if self.tracking {
            return;
        }
        let granted = self.service.request_permission();
        if !granted || !self.service.services_enabled() {
            warn!(
                "[location_tracker.start] location unavailable, permission granted: {}",
                granted
            );
            self.enabled = false;
            return;
        }
        self.enabled = true;
        self.service.start_updates();
        self.tracking = true;
        info!("location tracking started");
    }

    pub fn stop(&mut self) {
        if !self.tracking {
            return;
        }
        self.service.stop_updates();
        self.tracking = false;
        info!("location tracking stopped");
    }

    // NOTE: a trailing fix delivered after `stop` is still recorded. There is
    // also no staleness detection, if the platform goes quiet we keep showing
    // the last known position.
    pub fn on_update(&mut self, location: Location) {
        self.current = location;
        self.last_fix_at = Some(Utc::now());
        if let Some(observer) = self.observer.as_mut() {
            observer.on_location(&location);
        }
    }

    pub fn set_observer(&mut self, observer: Box<dyn LocationObserver>) {
        self.observer = Some(observer);
    }

    pub fn current(&self) -> Location {
        self.current
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn last_fix_at(&self) -> Option<DateTime<Utc>> {
        self.last_fix_at
    }
}

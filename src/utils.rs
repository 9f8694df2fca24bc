use geo_types::{coord, Rect};
use itertools::{Itertools, MinMaxResult};

use crate::location_tracker::Location;

// Roughly the length of one degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.11;

pub fn km_to_degrees(km: f64) -> f64 {
    km / KM_PER_DEGREE
}

/// `HH:MM:SS`, fractional seconds are truncated and hours do not wrap at 24.
pub fn format_travel_time(seconds: f64) -> String {
    let time = if seconds.is_finite() && seconds > 0.0 {
        seconds as i64
    } else {
        0
    };
    let hours = time / 3600;
    let minutes = time / 60 % 60;
    let seconds = time % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Kilometers with one decimal, no unit.
pub fn format_distance(meters: f64) -> String {
    format!("{:.1}", meters / 1000.0)
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    match values.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}

// TODO: paths crossing the antimeridian get a box spanning the whole globe.
pub fn bounding_rect(path: &[Location]) -> Option<Rect<f64>> {
    let (min_lat, max_lat) = min_max(path.iter().map(|l| l.latitude))?;
    let (min_lng, max_lng) = min_max(path.iter().map(|l| l.longitude))?;
    Some(Rect::new(
        coord! { x: min_lng, y: min_lat },
        coord! { x: max_lng, y: max_lat },
    ))
}

//! Distance, travel time and congestion derived from two coordinates.
//!
//! No routing data is consulted: distance is great-circle, duration assumes
//! an average city speed, and the traffic factor comes from the hour of day.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::entities::{Coordinates, RouteMetrics};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Shorter trips are quoted as this distance.
pub const MIN_DISTANCE_KM: f64 = 1.5;

/// About 17 km/h.
pub const MINUTES_PER_KM: f64 = 3.5;

const RUSH_HOUR_BASE: f64 = 1.4;
const RUSH_HOUR_JITTER: f64 = 0.3;
const OFF_PEAK_BASE: f64 = 1.0;
const OFF_PEAK_JITTER: f64 = 0.2;

pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lng = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);

    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance rounded to 0.1 km and floored at [`MIN_DISTANCE_KM`].
pub fn route_distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let distance = (haversine_km(from, to) * 10.0).round() / 10.0;
    distance.max(MIN_DISTANCE_KM)
}

pub fn is_rush_hour(hour: u32) -> bool {
    (7..=9).contains(&hour) || (17..=19).contains(&hour)
}

/// Rush hour lands in [1.4, 1.7), off-peak in [1.0, 1.2); two decimals.
pub fn traffic_factor<R: Rng + ?Sized>(hour: u32, rng: &mut R) -> f64 {
    let (base, jitter) = if is_rush_hour(hour) {
        (RUSH_HOUR_BASE, RUSH_HOUR_JITTER)
    } else {
        (OFF_PEAK_BASE, OFF_PEAK_JITTER)
    };

    let factor = base + Uniform::new(0.0, jitter).sample(rng);
    let rounded = (factor * 100.0).round() / 100.0;

    // rounding must not push the factor past its band
    rounded.min(base + jitter - 0.01).max(base)
}

#[tracing::instrument(skip(rng))]
pub fn estimate<R: Rng + ?Sized>(
    pickup: Coordinates,
    destination: Coordinates,
    hour: u32,
    rng: &mut R,
) -> RouteMetrics {
    let distance_km = route_distance_km(pickup, destination);
    let traffic_factor = traffic_factor(hour, rng);
    let duration_minutes = (distance_km * MINUTES_PER_KM * traffic_factor).round() as u32;

    RouteMetrics {
        distance_km,
        duration_minutes,
        traffic_factor,
    }
}

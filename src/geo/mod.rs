//! Distance, travel time and ordering helpers shared by every lookup.
//!
//! Everything in here is a pure function of its arguments. Non-finite input
//! is not rejected, it simply produces non-finite output, so callers are
//! expected to validate coordinates first.

use consts::{EARTH_RADIUS_KM, METERS_PER_KM};
use models::LatLng;

pub mod consts;
pub mod models;
pub mod sort;
pub mod travel;

/// Great-circle distance in kilometers between two points given in degrees.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi_1 = lat1.to_radians();
    let phi_2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();
    let a = (delta_phi / 2.0).sin().powi(2)
        + phi_1.cos() * phi_2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Point reached by travelling `distance_km` from `origin` along the initial
/// `bearing_deg` (clockwise from north) on a great circle.
pub fn destination(origin: LatLng, bearing_deg: f64, distance_km: f64) -> LatLng {
    let phi_1 = origin.lat.to_radians();
    let lambda_1 = origin.lng.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;
    let phi_2 = (phi_1.sin() * delta.cos() + phi_1.cos() * delta.sin() * theta.cos()).asin();
    let lambda_2 = lambda_1
        + (theta.sin() * delta.sin() * phi_1.cos()).atan2(delta.cos() - phi_1.sin() * phi_2.sin());
    LatLng {
        lat: phi_2.to_degrees(),
        lng: (lambda_2.to_degrees() + 540.0) % 360.0 - 180.0,
    }
}

/// Renders meters below one kilometer, otherwise kilometers with one decimal.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        let meters = round_half_up(km * METERS_PER_KM) as i64;
        format!("{meters} m")
    } else {
        let tenths = round_half_up(km * 10.0) / 10.0;
        format!("{tenths:.1} km")
    }
}

/// Rounds to the nearest integer with ties going towards positive infinity.
///
/// `f64::round` sends ties away from zero, which differs for negative halves.
pub(crate) fn round_half_up(value: f64) -> f64 {
    let rounded = value.round();
    if value - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    }
}

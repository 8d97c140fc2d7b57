/// Mean Earth radius used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const WALKING_SPEED_KMH: f64 = 5.0;
pub const CYCLING_SPEED_KMH: f64 = 15.0;
pub const DRIVING_SPEED_KMH: f64 = 40.0;

pub const METERS_PER_KM: f64 = 1000.0;
pub const MINUTES_PER_HOUR: f64 = 60.0;

use crate::geo::consts::{
    CYCLING_SPEED_KMH, DRIVING_SPEED_KMH, MINUTES_PER_HOUR, WALKING_SPEED_KMH,
};
use crate::geo::round_half_up;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TravelMode {
    #[default]
    Walking,
    Cycling,
    Driving,
}

impl TravelMode {
    /// Looks a mode up by its exact name. Anything unrecognized means walking.
    pub fn from_name(name: &str) -> Self {
        match name {
            "cycling" => Self::Cycling,
            "driving" => Self::Driving,
            _ => Self::Walking,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::Driving => "driving",
        }
    }
}

impl From<Option<&str>> for TravelMode {
    fn from(name: Option<&str>) -> Self {
        name.map(Self::from_name).unwrap_or_default()
    }
}

/// Average speed per travel mode, in kilometers per hour.
///
/// Built once at start-up and shared read-only between requests.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TravelSpeeds {
    pub walking_kmh: f64,
    pub cycling_kmh: f64,
    pub driving_kmh: f64,
}

impl TravelSpeeds {
    pub const DEFAULT: TravelSpeeds = TravelSpeeds {
        walking_kmh: WALKING_SPEED_KMH,
        cycling_kmh: CYCLING_SPEED_KMH,
        driving_kmh: DRIVING_SPEED_KMH,
    };

    pub const fn speed_kmh(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Walking => self.walking_kmh,
            TravelMode::Cycling => self.cycling_kmh,
            TravelMode::Driving => self.driving_kmh,
        }
    }
}

impl Default for TravelSpeeds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Estimated travel time in minutes for covering `km` at the mode's speed.
pub fn travel_time(km: f64, mode: TravelMode, speeds: &TravelSpeeds) -> f64 {
    (km / speeds.speed_kmh(mode)) * MINUTES_PER_HOUR
}

/// Human readable duration.
///
/// The leftover minutes are rounded after splitting off whole hours and are
/// never carried back, so 119.6 renders as "1 hour 60 mins".
pub fn format_travel_time(minutes: f64) -> String {
    if minutes < 1.0 {
        return String::from("Less than 1 min");
    }
    if minutes < MINUTES_PER_HOUR {
        return format!("{} mins", round_half_up(minutes));
    }
    let hours = (minutes / MINUTES_PER_HOUR).floor();
    let remaining = round_half_up(minutes % MINUTES_PER_HOUR);
    let hour_label = if hours > 1.0 { "hours" } else { "hour" };
    if remaining == 0.0 {
        format!("{hours} {hour_label}")
    } else {
        format!("{hours} {hour_label} {remaining} mins")
    }
}

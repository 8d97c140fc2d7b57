use crate::geo::travel::TravelSpeeds;
use crate::places::retry::RetryPolicy;
use crate::places::PlaceSourceKind;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

#[derive(Debug, Parser)]
#[command(version, about = "Finds points of interest around a location, closest first.")]
pub struct Args {
    #[arg(long, env = "LISTEN_ADDRESS")]
    #[arg(default_value = "0.0.0.0:3030")]
    pub listen_address: SocketAddr,
    /// Ships structured logs to this Quickwit instance when set.
    #[arg(long, env = "QUICKWIT_URL")]
    pub quickwit_url: Option<Url>,
    #[arg(long, env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    #[arg(default_value = "http://127.0.0.1:3000,http://localhost:3000")]
    pub allowed_origins: Vec<String>,
    #[arg(long, env = "PLACE_SOURCE", value_enum)]
    #[arg(default_value_t = PlaceSourceKind::Overpass)]
    pub place_source: PlaceSourceKind,
    #[arg(long, env = "OVERPASS_URL")]
    #[arg(default_value = "https://overpass-api.de/api/interpreter")]
    pub overpass_url: Url,
    #[arg(long, env = "SEARCH_RADIUS_M", default_value_t = 1500)]
    pub search_radius_m: u32,
    #[arg(long, env = "MAX_RESULTS", default_value_t = 20)]
    pub max_results: usize,
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 10)]
    pub upstream_timeout_secs: u64,
    #[arg(long, env = "UPSTREAM_MAX_ATTEMPTS", default_value_t = 3)]
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub upstream_max_attempts: u32,
    #[arg(long, env = "UPSTREAM_INITIAL_DELAY_MS", default_value_t = 200)]
    pub upstream_initial_delay_ms: u64,
    #[arg(long, env = "UPSTREAM_MAX_DELAY_MS", default_value_t = 2000)]
    pub upstream_max_delay_ms: u64,
    /// Makes the synthetic place source deterministic.
    #[arg(long, env = "SYNTHETIC_SEED")]
    pub synthetic_seed: Option<u64>,
    /// Share of synthetic places generated without a location.
    #[arg(long, env = "SYNTHETIC_MISSING_LOCATION_RATIO", default_value_t = 0.0)]
    pub synthetic_missing_location_ratio: f64,
    #[arg(long, env = "WALKING_SPEED_KMH", default_value_t = 5.0, value_parser = parse_speed)]
    pub walking_speed_kmh: f64,
    #[arg(long, env = "CYCLING_SPEED_KMH", default_value_t = 15.0, value_parser = parse_speed)]
    pub cycling_speed_kmh: f64,
    #[arg(long, env = "DRIVING_SPEED_KMH", default_value_t = 40.0, value_parser = parse_speed)]
    pub driving_speed_kmh: f64,
}

impl Args {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.upstream_max_attempts,
            initial_delay: Duration::from_millis(self.upstream_initial_delay_ms),
            max_delay: Duration::from_millis(self.upstream_max_delay_ms),
            ..RetryPolicy::default()
        }
    }

    pub fn travel_speeds(&self) -> TravelSpeeds {
        TravelSpeeds {
            walking_kmh: self.walking_speed_kmh,
            cycling_kmh: self.cycling_speed_kmh,
            driving_kmh: self.driving_speed_kmh,
        }
    }
}

fn parse_speed(raw: &str) -> Result<f64, String> {
    let speed: f64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err(format!("speed must be a positive number, got {raw}"))
    }
}

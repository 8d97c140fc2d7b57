use std::time::Duration;

pub const DEFAULT_LOG_DIRECTIVE: &str = "nearby_places_server=info";
pub const DEFAULT_CLIENT_IP: &str = "127.0.0.1";
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_REQUEST_ID: &str = "x-request-id";

pub const QUICKWIT_MARKER_FIELD: &str = "task";
pub const QUICKWIT_BATCH_SIZE: usize = 100;
pub const QUICKWIT_FLUSH_INTERVAL: Duration = Duration::from_secs(5);
pub const QUICKWIT_LOGGING_CHANNEL_CAPACITY: usize = 4096;

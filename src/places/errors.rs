use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaceSourceError {
    #[error("Invalid place source configuration: {0}")]
    Config(String),

    #[error("Failed to build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to the place source failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Place source responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode the place source response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Place source reported a runtime error: {0}")]
    Runtime(String),

    #[error("Place source still failing after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

impl PlaceSourceError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(err) => err.is_connect() || err.is_timeout(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Runtime(_) => true,
            Self::Config(_) | Self::Client(_) | Self::Decode(_) | Self::RetriesExhausted { .. } => {
                false
            }
        }
    }
}

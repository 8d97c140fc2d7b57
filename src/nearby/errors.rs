use crate::nearby::responses::{ErrorReason, ErrorResponse};
use crate::places::errors::PlaceSourceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

/// Problems with what the client sent. Always reported as `400 Bad Request`.
#[derive(Debug, Error, PartialEq)]
pub enum NearbyRequestError {
    #[error("The request could not be read: {0}")]
    MalformedBody(String),

    #[error("Both `lat` and `lng` are required.")]
    MissingCoordinates,

    #[error("Coordinates ({lat}, {lng}) are not a valid location.")]
    InvalidCoordinates { lat: f64, lng: f64 },

    #[error("`type` is required.")]
    MissingPlaceType,

    #[error("`{0}` is not a supported place type.")]
    InvalidPlaceType(String),
}

impl NearbyRequestError {
    pub fn reason(&self) -> ErrorReason {
        match self {
            Self::MalformedBody(_) => ErrorReason::MalformedBody,
            Self::MissingCoordinates => ErrorReason::MissingCoordinates,
            Self::InvalidCoordinates { .. } => ErrorReason::InvalidCoordinates,
            Self::MissingPlaceType => ErrorReason::MissingPlaceType,
            Self::InvalidPlaceType(_) => ErrorReason::InvalidPlaceType,
        }
    }
}

#[derive(Debug, Error)]
pub enum NearbyLookupError {
    #[error(transparent)]
    Request(#[from] NearbyRequestError),

    #[error("Nearby places are temporarily unavailable.")]
    PlaceSource(#[from] PlaceSourceError),
}

impl NearbyLookupError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Request(_) => StatusCode::BAD_REQUEST,
            Self::PlaceSource(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn reason(&self) -> ErrorReason {
        match self {
            Self::Request(err) => err.reason(),
            Self::PlaceSource(_) => ErrorReason::PlaceSourceUnavailable,
        }
    }
}

impl IntoResponse for NearbyLookupError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: true,
            reason: self.reason(),
            // Upstream details stay in the logs.
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

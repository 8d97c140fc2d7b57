use crate::geo::sort::Measured;
use crate::places::models::Place;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct NearbyPlacesResponse {
    pub results: Vec<PlaceResult>,
}

/// A place together with how far away it is and how long it takes to get there.
///
/// The four derived fields are either all present or all `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResult {
    #[serde(flatten)]
    pub place: Place,
    pub distance_km: Option<f64>,
    pub distance: Option<String>,
    pub travel_time_minutes: Option<f64>,
    pub travel_time: Option<String>,
}

impl Measured for PlaceResult {
    fn distance_km(&self) -> Option<f64> {
        self.distance_km
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: bool,
    pub reason: ErrorReason,
    pub message: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorReason {
    MalformedBody,
    MissingCoordinates,
    InvalidCoordinates,
    MissingPlaceType,
    InvalidPlaceType,
    PlaceSourceUnavailable,
}

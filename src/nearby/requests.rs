use crate::geo::models::LatLng;
use crate::geo::travel::TravelMode;
use crate::nearby::consts::MAX_PLACE_TYPE_LENGTH;
use crate::nearby::errors::NearbyRequestError;
use serde::Deserialize;

/// Body (or query string) of a nearby lookup, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct NearbyPlacesRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(rename = "type")]
    pub place_type: Option<String>,
    pub mode: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NearbyLookup {
    pub origin: LatLng,
    pub place_type: String,
    pub mode: TravelMode,
}

impl NearbyPlacesRequest {
    pub fn validate(self) -> Result<NearbyLookup, NearbyRequestError> {
        let (Some(lat), Some(lng)) = (self.lat, self.lng) else {
            return Err(NearbyRequestError::MissingCoordinates);
        };
        let origin = LatLng::new(lat, lng);
        if !origin.is_finite() || !origin.is_valid() {
            return Err(NearbyRequestError::InvalidCoordinates { lat, lng });
        }
        let place_type = self
            .place_type
            .map(|place_type| place_type.trim().to_string())
            .filter(|place_type| !place_type.is_empty())
            .ok_or(NearbyRequestError::MissingPlaceType)?;
        if !is_valid_place_type(&place_type) {
            return Err(NearbyRequestError::InvalidPlaceType(place_type));
        }
        Ok(NearbyLookup {
            origin,
            place_type,
            mode: TravelMode::from(self.mode.as_deref()),
        })
    }
}

/// Place types end up inside upstream queries, so only a conservative
/// charset is let through.
fn is_valid_place_type(place_type: &str) -> bool {
    place_type.len() <= MAX_PLACE_TYPE_LENGTH
        && place_type
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

use crate::app_context::{AppContext, RequestContext};
use crate::geo::models::LatLng;
use crate::geo::sort::sort_by_distance;
use crate::geo::travel::{format_travel_time, travel_time, TravelMode, TravelSpeeds};
use crate::geo::format_distance;
use crate::nearby::errors::NearbyLookupError;
use crate::nearby::requests::NearbyLookup;
use crate::nearby::responses::{NearbyPlacesResponse, PlaceResult};
use crate::places::models::{Place, PlaceQuery};

pub struct NearbyPlacesHttpHandler<'a> {
    app_context: AppContext,
    request_context: &'a RequestContext,
}

impl<'a> NearbyPlacesHttpHandler<'a> {
    pub fn new(app_context: AppContext, request_context: &'a RequestContext) -> Self {
        Self {
            app_context,
            request_context,
        }
    }

    pub async fn lookup(
        &self,
        lookup: NearbyLookup,
    ) -> Result<NearbyPlacesResponse, NearbyLookupError> {
        let query = PlaceQuery {
            origin: lookup.origin,
            category: lookup.place_type,
            radius_m: self.app_context.search.radius_m,
            limit: self.app_context.search.max_results,
        };
        let places = match self.app_context.places.nearby(&query).await {
            Ok(places) => places,
            Err(err) => {
                tracing::warn!(
                    task = "place_lookup",
                    request_id = %self.request_context.request_id,
                    place_source = self.app_context.places.name(),
                    place_type = %query.category,
                    error = %err,
                    "Failed to fetch nearby places."
                );
                return Err(err.into());
            }
        };

        let mut results: Vec<PlaceResult> = places
            .into_iter()
            .map(|place| enrich(place, query.origin, lookup.mode, &self.app_context.speeds))
            .collect();
        sort_by_distance(&mut results);

        let unmeasured = results.iter().filter(|result| result.distance_km.is_none()).count();
        tracing::info!(
            task = "place_lookup",
            request_id = %self.request_context.request_id,
            client_ip = %self.request_context.client_ip,
            place_source = self.app_context.places.name(),
            place_type = %query.category,
            travel_mode = lookup.mode.as_str(),
            results_count = results.len() as u64,
            unmeasured_count = unmeasured as u64,
        );
        Ok(NearbyPlacesResponse { results })
    }
}

/// Attaches distance and travel time to a place. Anything that can't be
/// measured gets `null`s instead of being dropped.
pub fn enrich(place: Place, origin: LatLng, mode: TravelMode, speeds: &TravelSpeeds) -> PlaceResult {
    match measure(place.location, origin, mode, speeds) {
        Some((distance_km, travel_time_minutes)) => PlaceResult {
            place,
            distance_km: Some(distance_km),
            distance: Some(format_distance(distance_km)),
            travel_time_minutes: Some(travel_time_minutes),
            travel_time: Some(format_travel_time(travel_time_minutes)),
        },
        None => {
            tracing::debug!(place_id = %place.id, "Could not measure the distance to a place.");
            PlaceResult {
                place,
                distance_km: None,
                distance: None,
                travel_time_minutes: None,
                travel_time: None,
            }
        }
    }
}

fn measure(
    location: Option<LatLng>,
    origin: LatLng,
    mode: TravelMode,
    speeds: &TravelSpeeds,
) -> Option<(f64, f64)> {
    let distance_km = origin.distance_to(&location?);
    let travel_time_minutes = travel_time(distance_km, mode, speeds);
    (distance_km.is_finite() && travel_time_minutes.is_finite())
        .then_some((distance_km, travel_time_minutes))
}

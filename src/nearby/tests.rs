use crate::app_context::{AppContext, SearchSettings};
use crate::geo::models::LatLng;
use crate::geo::travel::{TravelMode, TravelSpeeds};
use crate::http::tests::{test_server, test_server_with};
use crate::nearby::errors::NearbyRequestError;
use crate::nearby::requests::NearbyPlacesRequest;
use crate::nearby::responses::{ErrorReason, ErrorResponse, NearbyPlacesResponse};
use crate::nearby::service::enrich;
use crate::places::errors::PlaceSourceError;
use crate::places::models::{Place, PlaceQuery};
use crate::places::tests::{fast_retries, overpass_source, spawn_stub_overpass_with};
use crate::places::PlaceSource;
use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

const ORIGIN: LatLng = LatLng::new(52.52, 13.405);

struct FixedPlaceSource {
    places: Vec<Place>,
}

#[async_trait]
impl PlaceSource for FixedPlaceSource {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn nearby(&self, _query: &PlaceQuery) -> Result<Vec<Place>, PlaceSourceError> {
        Ok(self.places.clone())
    }
}

struct UnavailablePlaceSource;

#[async_trait]
impl PlaceSource for UnavailablePlaceSource {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn nearby(&self, _query: &PlaceQuery) -> Result<Vec<Place>, PlaceSourceError> {
        Err(PlaceSourceError::RetriesExhausted {
            attempts: 3,
            last_error: String::from("Place source responded with status 504: timeout"),
        })
    }
}

fn place(id: &str, location: Option<LatLng>) -> Place {
    Place {
        id: id.to_string(),
        name: Some(format!("Place {id}")),
        category: String::from("cafe"),
        location,
        address: None,
        tags: BTreeMap::new(),
    }
}

fn context_with(source: impl PlaceSource + 'static) -> AppContext {
    AppContext {
        places: Arc::new(source),
        speeds: TravelSpeeds::default(),
        search: SearchSettings {
            radius_m: 1500,
            max_results: 20,
        },
    }
}

fn fixed_places() -> Vec<Place> {
    vec![
        place("far", Some(LatLng::new(52.55, 13.405))),
        place("nowhere", None),
        place("near", Some(LatLng::new(52.5201, 13.405))),
        place("broken", Some(LatLng::new(f64::NAN, 13.405))),
        place("middle", Some(LatLng::new(52.53, 13.405))),
    ]
}

fn request(lat: Option<f64>, lng: Option<f64>, place_type: Option<&str>) -> NearbyPlacesRequest {
    NearbyPlacesRequest {
        lat,
        lng,
        place_type: place_type.map(str::to_string),
        mode: None,
    }
}

#[test]
fn test_validate_accepts_good_request() {
    let lookup = NearbyPlacesRequest {
        mode: Some(String::from("driving")),
        ..request(Some(52.52), Some(13.405), Some(" cafe "))
    }
    .validate()
    .expect("request should be valid");
    assert_eq!(lookup.origin, ORIGIN);
    assert_eq!(lookup.place_type, "cafe");
    assert_eq!(lookup.mode, TravelMode::Driving);
}

#[test]
fn test_validate_defaults_to_walking() {
    let lookup = NearbyPlacesRequest {
        mode: Some(String::from("teleporting")),
        ..request(Some(0.0), Some(0.0), Some("atm"))
    }
    .validate()
    .expect("request should be valid");
    assert_eq!(lookup.mode, TravelMode::Walking);
}

#[test]
fn test_validate_rejects_bad_requests() {
    assert_eq!(
        request(None, Some(13.4), Some("cafe")).validate(),
        Err(NearbyRequestError::MissingCoordinates)
    );
    assert_eq!(
        request(Some(91.0), Some(13.4), Some("cafe")).validate(),
        Err(NearbyRequestError::InvalidCoordinates {
            lat: 91.0,
            lng: 13.4
        })
    );
    assert!(matches!(
        request(Some(f64::INFINITY), Some(13.4), Some("cafe")).validate(),
        Err(NearbyRequestError::InvalidCoordinates { .. })
    ));
    assert_eq!(
        request(Some(52.5), Some(13.4), Some("   ")).validate(),
        Err(NearbyRequestError::MissingPlaceType)
    );
    assert_eq!(
        request(Some(52.5), Some(13.4), Some("cafe\"];node[")).validate(),
        Err(NearbyRequestError::InvalidPlaceType(String::from(
            "cafe\"];node["
        )))
    );
    assert!(matches!(
        request(Some(52.5), Some(13.4), Some(&"a".repeat(65))).validate(),
        Err(NearbyRequestError::InvalidPlaceType(_))
    ));
}

#[test]
fn test_enrich_measured_place() {
    let result = enrich(
        place("near", Some(LatLng::new(52.5245, 13.405))),
        ORIGIN,
        TravelMode::Walking,
        &TravelSpeeds::default(),
    );
    assert_eq!(result.distance.as_deref(), Some("500 m"));
    assert_eq!(result.travel_time.as_deref(), Some("6 mins"));
    assert!((result.distance_km.unwrap_or_default() - 0.5004).abs() < 1e-3);
}

#[test]
fn test_enrich_degrades_to_nulls() {
    for location in [None, Some(LatLng::new(f64::NAN, 0.0))] {
        let result = enrich(
            place("x", location),
            ORIGIN,
            TravelMode::Cycling,
            &TravelSpeeds::default(),
        );
        assert_eq!(result.distance_km, None);
        assert_eq!(result.distance, None);
        assert_eq!(result.travel_time_minutes, None);
        assert_eq!(result.travel_time, None);
        assert_eq!(result.place.id, "x");
    }
}

#[tokio::test]
async fn test_nearby_results_are_sorted() {
    let server = test_server_with(context_with(FixedPlaceSource {
        places: fixed_places(),
    }));

    let response = server
        .post("/places/nearby")
        .json(&json!({ "lat": 52.52, "lng": 13.405, "type": "cafe", "mode": "driving" }))
        .await;

    response.assert_status_ok();
    // A NaN coordinate serializes as `null`, so read the body loosely.
    let body = response.json::<Value>();
    let results = body["results"].as_array().cloned().unwrap_or_default();
    let ids: Vec<&str> = results.iter().filter_map(|r| r["id"].as_str()).collect();
    assert_eq!(ids, vec!["near", "middle", "far", "nowhere", "broken"]);
    assert_eq!(results[0]["distance"], "11 m");
    assert_eq!(results[0]["travelTime"], "Less than 1 min");
    assert_eq!(results[2]["distance"], "3.3 km");
    assert_eq!(results[2]["travelTime"], "5 mins");
    assert_eq!(results[4]["distanceKm"], Value::Null);
    assert_eq!(results[4]["travelTime"], Value::Null);
}

#[tokio::test]
async fn test_nearby_json_shape() {
    let server = test_server_with(context_with(FixedPlaceSource {
        places: vec![place("nowhere", None), place("here", Some(ORIGIN))],
    }));

    let response = server
        .post("/places/nearby")
        .json(&json!({ "lat": 52.52, "lng": 13.405, "type": "cafe" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "results": [
            {
                "id": "here",
                "name": "Place here",
                "category": "cafe",
                "location": { "lat": 52.52, "lng": 13.405 },
                "distanceKm": 0.0,
                "distance": "0 m",
                "travelTimeMinutes": 0.0,
                "travelTime": "Less than 1 min"
            },
            {
                "id": "nowhere",
                "name": "Place nowhere",
                "category": "cafe",
                "location": null,
                "distanceKm": null,
                "distance": null,
                "travelTimeMinutes": null,
                "travelTime": null
            }
        ]
    }));
}

#[tokio::test]
async fn test_nearby_with_synthetic_source() {
    let server = test_server();

    let response = server
        .get("/places/nearby")
        .add_query_param("lat", 48.8566)
        .add_query_param("lng", 2.3522)
        .add_query_param("type", "bakery")
        .await;

    response.assert_status_ok();
    let body = response.json::<NearbyPlacesResponse>();
    assert_eq!(body.results.len(), 12);
    let distances: Vec<f64> = body
        .results
        .iter()
        .map(|r| r.distance_km.expect("synthetic places are always located"))
        .collect();
    assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(distances.iter().all(|km| *km <= 1.5 + 1e-9));
}

#[tokio::test]
async fn test_nearby_rejects_missing_coordinates() {
    let server = test_server();

    let response = server
        .post("/places/nearby")
        .json(&json!({ "lng": 13.405, "type": "cafe" }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<ErrorResponse>();
    assert!(body.error);
    assert_eq!(body.reason, ErrorReason::MissingCoordinates);
}

#[tokio::test]
async fn test_nearby_rejects_invalid_coordinates() {
    let server = test_server();

    let response = server
        .post("/places/nearby")
        .json(&json!({ "lat": 123.0, "lng": 13.405, "type": "cafe" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<ErrorResponse>().reason,
        ErrorReason::InvalidCoordinates
    );
}

#[tokio::test]
async fn test_nearby_rejects_non_finite_query_coordinates() {
    let server = test_server();

    let response = server
        .get("/places/nearby")
        .add_query_param("lat", "NaN")
        .add_query_param("lng", 2.3522)
        .add_query_param("type", "bakery")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<ErrorResponse>().reason,
        ErrorReason::InvalidCoordinates
    );
}

#[tokio::test]
async fn test_nearby_rejects_missing_type() {
    let server = test_server();

    let response = server
        .post("/places/nearby")
        .json(&json!({ "lat": 52.52, "lng": 13.405 }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<ErrorResponse>().reason,
        ErrorReason::MissingPlaceType
    );
}

#[tokio::test]
async fn test_nearby_rejects_malformed_body() {
    let server = test_server();

    let response = server
        .post("/places/nearby")
        .json(&json!({ "lat": "north", "lng": 13.405, "type": "cafe" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<ErrorResponse>().reason,
        ErrorReason::MalformedBody
    );
}

#[tokio::test]
async fn test_nearby_reports_unavailable_place_source() {
    let server = test_server_with(context_with(UnavailablePlaceSource));

    let response = server
        .post("/places/nearby")
        .json(&json!({ "lat": 52.52, "lng": 13.405, "type": "cafe" }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body = response.json::<Value>();
    assert_eq!(body["error"], true);
    assert_eq!(body["reason"], "placeSourceUnavailable");
}

#[tokio::test]
async fn test_nearby_reports_overpass_runtime_error() {
    let stub = spawn_stub_overpass_with(
        usize::MAX,
        StatusCode::OK,
        r#"{"elements": [], "remark": "runtime error: Query timed out"}"#,
    )
    .await;
    let server = test_server_with(context_with(overpass_source(stub.url, fast_retries())));

    let response = server
        .post("/places/nearby")
        .json(&json!({ "lat": 52.52, "lng": 13.405, "type": "cafe" }))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["reason"], "placeSourceUnavailable");
}

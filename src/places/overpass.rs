use crate::geo::models::LatLng;
use crate::places::errors::PlaceSourceError;
use crate::places::models::{Place, PlaceQuery};
use crate::places::retry::RetryPolicy;
use crate::places::PlaceSource;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

const X_REQUEST_ID: &str = "X-Request-ID";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY_LENGTH: usize = 256;
const RUNTIME_ERROR_REMARK: &str = "runtime error";
/// Extra time the client waits past the server-side `[timeout:N]`, so that a
/// query timing out upstream is reported in a remark rather than cut off.
const CLIENT_TIMEOUT_HEADROOM: Duration = Duration::from_secs(5);

const SHOP_CATEGORIES: &[&str] = &[
    "supermarket",
    "bakery",
    "convenience",
    "butcher",
    "books",
    "clothes",
    "greengrocer",
];
const LEISURE_CATEGORIES: &[&str] = &[
    "park",
    "playground",
    "fitness_centre",
    "sports_centre",
    "swimming_pool",
];
const TOURISM_CATEGORIES: &[&str] = &[
    "hotel",
    "hostel",
    "guest_house",
    "museum",
    "attraction",
    "viewpoint",
];

/// Live place source backed by an Overpass API interpreter.
pub struct OverpassPlaceSource {
    http_client: Client,
    interpreter_url: Url,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl OverpassPlaceSource {
    pub fn new(
        interpreter_url: Url,
        timeout: Duration,
        retry_policy: RetryPolicy,
    ) -> Result<Self, PlaceSourceError> {
        let http_client = Client::builder()
            .timeout(timeout + CLIENT_TIMEOUT_HEADROOM)
            .user_agent(USER_AGENT)
            .build()
            .map_err(PlaceSourceError::Client)?;
        Ok(Self {
            http_client,
            interpreter_url,
            timeout,
            retry_policy,
        })
    }

    async fn fetch_once(
        &self,
        request_id: &str,
        overpass_query: &str,
    ) -> Result<OverpassResponse, PlaceSourceError> {
        let response = self
            .http_client
            .post(self.interpreter_url.clone())
            .header(X_REQUEST_ID, request_id)
            .form(&[("data", overpass_query)])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(PlaceSourceError::Status {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY_LENGTH).collect(),
            });
        }
        let response: OverpassResponse = serde_json::from_str(&body)?;
        if let Some(remark) = response.remark.as_deref() {
            // Server-side timeouts and memory exhaustion still come back as 200.
            if remark.starts_with(RUNTIME_ERROR_REMARK) {
                return Err(PlaceSourceError::Runtime(remark.to_string()));
            }
            tracing::warn!(request_id = %request_id, remark = %remark, "Overpass returned a remark.");
        }
        Ok(response)
    }
}

#[async_trait]
impl PlaceSource for OverpassPlaceSource {
    fn name(&self) -> &'static str {
        "overpass"
    }

    async fn nearby(&self, query: &PlaceQuery) -> Result<Vec<Place>, PlaceSourceError> {
        let request_id = Uuid::new_v4().to_string();
        let overpass_query = build_query(query, self.timeout);
        let max_attempts = self.retry_policy.max_attempts;
        let mut last_error = None;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let delay = self.retry_policy.delay_for_attempt(attempt);
                tracing::debug!(
                    request_id = %request_id,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying Overpass request after delay."
                );
                tokio::time::sleep(delay).await;
            }

            match self.fetch_once(&request_id, &overpass_query).await {
                Ok(response) => return Ok(response.into_places(&query.category, query.limit)),
                Err(err) if err.is_retryable() => {
                    tracing::debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        error = %err,
                        "Overpass request failed."
                    );
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(PlaceSourceError::RetriesExhausted {
            attempts: max_attempts,
            last_error: last_error
                .map_or_else(|| String::from("no attempt was made"), |err| err.to_string()),
        })
    }
}

/// OSM tag that identifies places of the given category.
#[derive(Debug, PartialEq, Eq)]
pub struct TagFilter<'a> {
    pub key: &'static str,
    pub value: &'a str,
}

impl<'a> TagFilter<'a> {
    pub fn for_category(category: &'a str) -> Self {
        let key = if SHOP_CATEGORIES.contains(&category) {
            "shop"
        } else if LEISURE_CATEGORIES.contains(&category) {
            "leisure"
        } else if TOURISM_CATEGORIES.contains(&category) {
            "tourism"
        } else {
            "amenity"
        };
        Self {
            key,
            value: category,
        }
    }
}

/// The category must already be validated: it is interpolated into the query verbatim.
pub fn build_query(query: &PlaceQuery, timeout: Duration) -> String {
    let TagFilter { key, value } = TagFilter::for_category(&query.category);
    let around = format!(
        "around:{},{},{}",
        query.radius_m, query.origin.lat, query.origin.lng
    );
    format!(
        "[out:json][timeout:{timeout}];\n\
         (\n  \
           node[\"{key}\"=\"{value}\"]({around});\n  \
           way[\"{key}\"=\"{value}\"]({around});\n\
         );\n\
         out tags center {limit};\n",
        timeout = timeout.as_secs().max(1),
        limit = query.limit,
    )
}

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
    pub remark: Option<String>,
}

impl OverpassResponse {
    pub fn into_places(self, category: &str, limit: usize) -> Vec<Place> {
        self.elements
            .into_iter()
            .take(limit)
            .map(|element| element.into_place(category))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// Nodes carry their own coordinates, ways only have a center when asked for one.
    pub fn location(&self) -> Option<LatLng> {
        match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Some(LatLng::new(lat, lon)),
            (_, _, Some(center)) => Some(LatLng::new(center.lat, center.lon)),
            _ => None,
        }
    }

    pub fn address(&self) -> Option<String> {
        let street = self.tags.get("addr:street");
        let house_number = self.tags.get("addr:housenumber");
        let street_line = match (street, house_number) {
            (Some(street), Some(number)) => Some(format!("{street} {number}")),
            (Some(street), None) => Some(street.clone()),
            _ => None,
        };
        let city = self.tags.get("addr:city").cloned();
        match (street_line, city) {
            (Some(street_line), Some(city)) => Some(format!("{street_line}, {city}")),
            (street_line, city) => street_line.or(city),
        }
    }

    pub fn into_place(self, category: &str) -> Place {
        let location = self.location();
        let address = self.address();
        Place {
            id: format!("{}/{}", self.kind, self.id),
            name: self.tags.get("name").cloned(),
            category: category.to_string(),
            location,
            address,
            tags: self.tags,
        }
    }
}

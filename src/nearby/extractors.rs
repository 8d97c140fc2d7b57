use crate::nearby::errors::{NearbyLookupError, NearbyRequestError};
use crate::nearby::requests::{NearbyLookup, NearbyPlacesRequest};
use async_trait::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;

/// A validated lookup read from a JSON body.
pub struct JsonLookup(pub NearbyLookup);

#[async_trait]
impl<S> FromRequest<S> for JsonLookup
where
    S: Send + Sync,
{
    type Rejection = NearbyLookupError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<NearbyPlacesRequest>::from_request(request, state)
            .await
            .map_err(|rejection| NearbyRequestError::MalformedBody(rejection.body_text()))?;
        Ok(Self(body.validate()?))
    }
}

/// A validated lookup read from the query string.
pub struct QueryLookup(pub NearbyLookup);

#[async_trait]
impl<S> FromRequestParts<S> for QueryLookup
where
    S: Send + Sync,
{
    type Rejection = NearbyLookupError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<NearbyPlacesRequest>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| NearbyRequestError::MalformedBody(rejection.body_text()))?;
        Ok(Self(params.validate()?))
    }
}

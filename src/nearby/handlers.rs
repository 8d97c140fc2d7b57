use crate::app_context::{AppContext, RequestContext};
use crate::nearby::errors::NearbyLookupError;
use crate::nearby::extractors::{JsonLookup, QueryLookup};
use crate::nearby::responses::NearbyPlacesResponse;
use crate::nearby::service::NearbyPlacesHttpHandler;
use axum::extract::State;
use axum::response::Json;
use axum::Extension;

#[axum::debug_handler]
pub async fn search(
    Extension(request_context): Extension<RequestContext>,
    State(app_context): State<AppContext>,
    JsonLookup(lookup): JsonLookup,
) -> Result<Json<NearbyPlacesResponse>, NearbyLookupError> {
    let response = NearbyPlacesHttpHandler::new(app_context, &request_context)
        .lookup(lookup)
        .await?;
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn search_by_query(
    Extension(request_context): Extension<RequestContext>,
    State(app_context): State<AppContext>,
    QueryLookup(lookup): QueryLookup,
) -> Result<Json<NearbyPlacesResponse>, NearbyLookupError> {
    let response = NearbyPlacesHttpHandler::new(app_context, &request_context)
        .lookup(lookup)
        .await?;
    Ok(Json(response))
}

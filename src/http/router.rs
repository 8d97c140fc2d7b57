use crate::app_context::AppContext;
use crate::cli::Args;
use crate::{health, http::cors, nearby};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

pub fn new(args: &Args, app_context: AppContext) -> Router {
    let cors_policy = cors::layer(args);
    tracing::info!("Initialized HTTP configuration.");

    let health_routes = Router::new().route("/check", get(health::handlers::healthcheck));
    let places_routes = Router::new().route(
        "/nearby",
        post(nearby::handlers::search).get(nearby::handlers::search_by_query),
    );

    Router::new()
        .nest("/health", health_routes)
        .nest("/places", places_routes)
        .with_state(app_context)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(crate::http::middleware::tracing))
                .layer(cors_policy),
        )
}

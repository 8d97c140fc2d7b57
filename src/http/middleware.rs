use crate::app_context::RequestContext;
use crate::logging::consts::{DEFAULT_CLIENT_IP, X_FORWARDED_FOR, X_REQUEST_ID};
use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;
use uuid::Uuid;

pub async fn tracing(mut request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client_ip = request
        .headers()
        .get(X_FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .unwrap_or_else(|| DEFAULT_CLIENT_IP.to_string());
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    request.extensions_mut().insert(RequestContext {
        request_id: request_id.clone(),
        client_ip: client_ip.clone(),
    });

    let start_time = Instant::now();
    let mut response = next.run(request).await;
    let elapsed_time = start_time.elapsed().as_micros();

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    tracing::info!(
        task = "http_request",
        http_method = %method,
        endpoint = %path,
        status = response.status().as_u16(),
        request_id = %request_id,
        client_ip = %client_ip,
        processing_time_us = elapsed_time as u64,
    );

    response
}

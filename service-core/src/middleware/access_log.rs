use axum::extract::{ConnectInfo, Request};
use axum::{middleware::Next, response::Response};
use std::net::SocketAddr;
use std::time::Instant;

use super::tracing::REQUEST_ID_HEADER;

/// Log one line per inbound request with the caller address, then one with
/// the outcome.
pub async fn access_log_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let client_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        client_addr = %client_addr,
        "Request received"
    );

    let response = next.run(req).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}

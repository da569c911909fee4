use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use std::sync::atomic::{AtomicU64, Ordering};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

static LAST_REQUEST_ID: AtomicU64 = AtomicU64::new(0);

/// Identifier attached to every request as an extension and echoed back in
/// the `x-request-id` response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Milliseconds since the Unix epoch, bumped by one whenever two requests
/// land in the same millisecond so ids are strictly increasing per process.
pub fn next_request_id() -> RequestId {
    let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let mut last = LAST_REQUEST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_REQUEST_ID.compare_exchange_weak(
            last,
            candidate,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return RequestId(candidate.to_string()),
            Err(current) => last = current,
        }
    }
}

pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| RequestId(s.to_string()))
        .unwrap_or_else(next_request_id);

    if let Ok(header_value) = HeaderValue::from_str(&request_id.0) {
        req.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }
    req.extensions_mut().insert(request_id.clone());

    let mut response = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id.0) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    response
}

//! Request metrics.
//!
//! The `path` label is the route template (`/api/v1/blog/{id}`), never the
//! concrete URI. Requests answered by the fallback share the `unmatched` label
//! so probing random URLs cannot grow the series count.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, histogram};

const REQUESTS_TOTAL: &str = "bitacora_http_requests_total";
const REQUEST_DURATION: &str = "bitacora_http_request_duration_seconds";
const UNMATCHED_ROUTE: &str = "unmatched";

/// Counts every request by method, route and status, and times it by method and route.
pub async fn http_metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().as_str().to_owned();
    let route = route_label(matched_path.as_ref());

    let response = next.run(request).await;

    let elapsed = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(REQUESTS_TOTAL, "method" => method.clone(), "path" => route.clone(), "status" => status)
        .increment(1);
    histogram!(REQUEST_DURATION, "method" => method, "path" => route).record(elapsed);

    response
}

fn route_label(matched_path: Option<&MatchedPath>) -> String {
    matched_path
        .map(MatchedPath::as_str)
        .unwrap_or(UNMATCHED_ROUTE)
        .to_owned()
}

pub fn register_http_metrics() {
    metrics::describe_counter!(REQUESTS_TOTAL, "HTTP requests by method, route and status");
    metrics::describe_histogram!(
        REQUEST_DURATION,
        metrics::Unit::Seconds,
        "HTTP request latency by method and route"
    );
}

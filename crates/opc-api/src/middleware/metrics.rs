//! # Prometheus Metrics
//!
//! Request and domain metrics recorded through the `metrics` facade. The
//! binary installs a `metrics-exporter-prometheus` recorder and serves its
//! rendering at `/metrics`; without a recorder every call here is a no-op.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Requests served, labelled by method, route template, and status code.
pub const HTTP_REQUESTS_TOTAL: &str = "opc_http_requests_total";
/// Request latency histogram, labelled by method and route template.
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "opc_http_request_duration_seconds";
/// Number of pack sizes in the current registry snapshot.
pub const PACK_SIZES_CONFIGURED: &str = "opc_pack_sizes_configured";
/// Calculations attempted, labelled by outcome.
pub const CALCULATIONS_TOTAL: &str = "opc_calculations_total";

/// Outcome label for [`CALCULATIONS_TOTAL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationOutcome {
    Ok,
    InvalidOrder,
    NoPackSizes,
    Failed,
}

impl CalculationOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::InvalidOrder => "invalid_order",
            Self::NoPackSizes => "no_pack_sizes",
            Self::Failed => "failed",
        }
    }
}

/// Record one calculation.
pub fn record_calculation(outcome: CalculationOutcome) {
    ::metrics::counter!(CALCULATIONS_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

/// Publish the current registry size.
pub fn set_pack_sizes_configured(count: usize) {
    ::metrics::gauge!(PACK_SIZES_CONFIGURED).set(count as f64);
}

/// Middleware recording request count and latency per matched route.
///
/// Mounted with `route_layer` so the route template is available and
/// unmatched paths do not create label series.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    ::metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    ::metrics::histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "method" => method,
        "path" => path
    )
    .record(start.elapsed().as_secs_f64());

    response
}

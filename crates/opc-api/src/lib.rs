//! # opc-api: Axum HTTP Service for the Order Packs Calculator
//!
//! Exposes the [`opc_registry::PackCalculator`] boundary over HTTP with the
//! JSON shapes the browser client uses.
//!
//! ## API Surface
//!
//! | Method | Path                 | Module               |
//! |--------|----------------------|----------------------|
//! | GET    | `/api/packs`         | [`routes::packs`]    |
//! | POST   | `/api/packs`         | [`routes::packs`]    |
//! | DELETE | `/api/packs/{size}`  | [`routes::packs`]    |
//! | POST   | `/api/calculate`     | [`routes::calculate`] |
//! | GET    | `/openapi.json`      | [`openapi`]          |
//! | GET    | `/metrics`           | Prometheus scrape    |
//! | GET    | `/health/*`          | probes               |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler (AdminAuth extractor on mutations)
//! ```
//!
//! ## Crate Policy
//!
//! - Sits at the top of the dependency DAG.
//! - No calculation logic in route handlers; they delegate to `opc-registry`.
//! - All errors map to structured HTTP responses via `AppError`.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::{AppConfig, AppState};

use axum::extract::State;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) and `/metrics` are mounted outside the
/// request metrics and tracing layers.
pub fn app(state: AppState) -> Router {
    let metrics_handle = state
        .metrics
        .clone()
        .filter(|_| state.config.metrics_enabled);

    let mut api = Router::new()
        .merge(routes::packs::router())
        .merge(routes::calculate::router())
        .merge(openapi::router());
    if state.config.metrics_enabled {
        api = api.route_layer(from_fn(middleware::metrics::metrics_middleware));
    }
    let api = api
        .layer(middleware::tracing_layer::layer())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    let mut router = Router::new().merge(health).merge(api);
    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(handle),
        );
    }
    router
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}

/// GET /metrics: Prometheus text exposition.
async fn prometheus_metrics(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order Packs Calculator API",
        version = "0.1.0",
        description = "Pack size administration and minimal-overage shipment calculation.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::packs::list_packs,
        crate::routes::packs::add_pack,
        crate::routes::packs::remove_pack,
        crate::routes::calculate::calculate,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::packs::PackSizeEntry,
        crate::routes::packs::PackSizeInput,
        crate::routes::packs::AddPackRequest,
        crate::routes::packs::SuccessResponse,
        crate::routes::calculate::CalculateRequest,
        opc_core::ShipmentSummary,
    )),
    tags(
        (name = "packs", description = "Pack size registry"),
        (name = "calculate", description = "Shipment calculation"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

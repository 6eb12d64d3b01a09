//! # Shipment Calculation
//!
//! `POST /api/calculate` runs one order against the current registry
//! snapshot and returns the packs to ship.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use opc_core::ShipmentSummary;
use opc_registry::CalculateError;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::middleware::metrics::{self, CalculationOutcome};
use crate::state::AppState;

/// Calculation request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    /// Items ordered. Must be positive.
    pub order_size: i64,
}

/// Build the calculate router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/calculate", post(calculate))
}

/// POST /api/calculate: Packs to ship for an order.
#[utoipa::path(
    post,
    path = "/api/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Shipment", body = ShipmentSummary),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 409, description = "No pack sizes configured", body = crate::error::ErrorBody),
        (status = 422, description = "Order not positive or beyond the search budget", body = crate::error::ErrorBody),
    ),
    tag = "calculate"
)]
pub(crate) async fn calculate(
    State(state): State<AppState>,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<ShipmentSummary>, AppError> {
    let req = extract_json(body)?;
    match state.calculator.calculate(req.order_size) {
        Ok(shipment) => {
            metrics::record_calculation(CalculationOutcome::Ok);
            Ok(Json(ShipmentSummary::from(&shipment)))
        }
        Err(err) => {
            metrics::record_calculation(match &err {
                CalculateError::InvalidOrder(_) => CalculationOutcome::InvalidOrder,
                CalculateError::NoPackSizesConfigured => CalculationOutcome::NoPackSizes,
                CalculateError::Optimizer(_) => CalculationOutcome::Failed,
            });
            Err(err.into())
        }
    }
}

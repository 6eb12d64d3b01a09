//! # Pack Size Administration
//!
//! List, add, and remove the pack sizes the calculator may ship.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use opc_core::PackSize;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AdminAuth;
use crate::error::AppError;
use crate::extractors::{extract_path, extract_validated_json, Validate};
use crate::middleware::metrics;
use crate::state::AppState;

/// One configured pack size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackSizeEntry {
    pub pack_size: u64,
}

impl From<PackSize> for PackSizeEntry {
    fn from(size: PackSize) -> Self {
        Self {
            pack_size: size.get(),
        }
    }
}

/// Pack size as submitted by a client. Signed so that negative input reaches
/// validation instead of failing deserialization.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackSizeInput {
    pub pack_size: i64,
}

/// Add pack size request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddPackRequest {
    pub pack: PackSizeInput,
}

impl Validate for AddPackRequest {
    fn validate(&self) -> Result<(), String> {
        if self.pack.pack_size <= 0 {
            return Err(format!(
                "packSize must be greater than zero: got {}",
                self.pack.pack_size
            ));
        }
        Ok(())
    }
}

/// Acknowledgement for a successful mutation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Build the packs router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/packs", get(list_packs).post(add_pack))
        .route("/api/packs/{size}", delete(remove_pack))
}

/// GET /api/packs: Current pack sizes, ascending.
#[utoipa::path(
    get,
    path = "/api/packs",
    responses(
        (status = 200, description = "Configured pack sizes", body = Vec<PackSizeEntry>),
    ),
    tag = "packs"
)]
pub(crate) async fn list_packs(State(state): State<AppState>) -> Json<Vec<PackSizeEntry>> {
    Json(
        state
            .calculator
            .list_pack_sizes()
            .into_iter()
            .map(PackSizeEntry::from)
            .collect(),
    )
}

/// POST /api/packs: Register a pack size.
#[utoipa::path(
    post,
    path = "/api/packs",
    request_body = AddPackRequest,
    responses(
        (status = 200, description = "Pack size added", body = SuccessResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid admin token", body = crate::error::ErrorBody),
        (status = 409, description = "Pack size already exists", body = crate::error::ErrorBody),
        (status = 422, description = "Pack size not positive", body = crate::error::ErrorBody),
    ),
    tag = "packs"
)]
pub(crate) async fn add_pack(
    _admin: AdminAuth,
    State(state): State<AppState>,
    body: Result<Json<AddPackRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let snapshot = state.calculator.add_pack_size(req.pack.pack_size)?;
    metrics::set_pack_sizes_configured(snapshot.sizes().len());
    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/packs/{size}: Unregister a pack size.
#[utoipa::path(
    delete,
    path = "/api/packs/{size}",
    params(("size" = i64, Path, description = "Pack size to remove")),
    responses(
        (status = 200, description = "Pack size removed", body = SuccessResponse),
        (status = 400, description = "Size is not an integer", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or invalid admin token", body = crate::error::ErrorBody),
        (status = 404, description = "Pack size not configured", body = crate::error::ErrorBody),
        (status = 422, description = "Pack size not positive", body = crate::error::ErrorBody),
    ),
    tag = "packs"
)]
pub(crate) async fn remove_pack(
    _admin: AdminAuth,
    State(state): State<AppState>,
    size: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let size = extract_path(size)?;
    let snapshot = state.calculator.remove_pack_size(size)?;
    metrics::set_pack_sizes_configured(snapshot.sizes().len());
    Ok(Json(SuccessResponse { success: true }))
}

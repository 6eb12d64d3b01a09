//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps registry and calculation errors to HTTP status codes and returns JSON
//! bodies with an error code and message. Internal error details are logged,
//! never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use opc_optimizer::OptimizeError;
use opc_registry::{CalculateError, RegistryError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// Every error response carries an `error` object; clients treat its
/// presence as the failure signal.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid admin token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Conflict with current registry state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match &err {
            RegistryError::InvalidSize(_) => Self::Validation(err.to_string()),
            RegistryError::Duplicate(_) => Self::Conflict(err.to_string()),
            RegistryError::NotFound(_) => Self::NotFound(err.to_string()),
        }
    }
}

impl From<CalculateError> for AppError {
    fn from(err: CalculateError) -> Self {
        match &err {
            CalculateError::InvalidOrder(_) => Self::Validation(err.to_string()),
            CalculateError::NoPackSizesConfigured => Self::Conflict(err.to_string()),
            // The caller can fix these by ordering less or reconfiguring sizes.
            CalculateError::Optimizer(
                OptimizeError::SearchSpaceTooLarge { .. } | OptimizeError::Overflow,
            ) => Self::Validation(err.to_string()),
            CalculateError::Optimizer(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opc_core::{PackSize, ValidationError};

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                AppError::Validation("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
            ),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code), "{err}");
        }
    }

    #[test]
    fn registry_errors_map_to_statuses() {
        let size = PackSize::new(250).unwrap();
        let invalid = AppError::from(RegistryError::InvalidSize(ValidationError::InvalidPackSize(0)));
        assert_eq!(invalid.status_and_code().0, StatusCode::UNPROCESSABLE_ENTITY);
        let duplicate = AppError::from(RegistryError::Duplicate(size));
        assert_eq!(duplicate.status_and_code().0, StatusCode::CONFLICT);
        let missing = AppError::from(RegistryError::NotFound(size));
        assert_eq!(missing.status_and_code().0, StatusCode::NOT_FOUND);
        assert!(missing.to_string().contains("pack size 250 not found"));
    }

    #[test]
    fn calculate_errors_map_to_statuses() {
        let invalid = AppError::from(CalculateError::InvalidOrder(ValidationError::InvalidOrder(-1)));
        assert_eq!(invalid.status_and_code().0, StatusCode::UNPROCESSABLE_ENTITY);

        let empty = AppError::from(CalculateError::NoPackSizesConfigured);
        assert_eq!(empty.status_and_code().0, StatusCode::CONFLICT);

        let budget = AppError::from(CalculateError::Optimizer(OptimizeError::SearchSpaceTooLarge {
            required: 10,
            limit: 5,
        }));
        assert_eq!(budget.status_and_code().0, StatusCode::UNPROCESSABLE_ENTITY);

        let defect = AppError::from(CalculateError::Optimizer(OptimizeError::Inconsistent(
            "window empty".into(),
        )));
        assert_eq!(defect.status_and_code().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_conflict() {
        let (status, body) = response_parts(AppError::Conflict("pack size 250 already exists".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error.code, "CONFLICT");
        assert!(body.error.message.contains("already exists"));
    }

    #[tokio::test]
    async fn into_response_internal_hides_cause() {
        let (status, body) = response_parts(AppError::Internal("residue window empty".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert_eq!(body.error.message, "An internal error occurred");
    }
}

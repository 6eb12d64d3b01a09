//! # Admin Authentication
//!
//! Mutating registry routes take an [`AdminAuth`] extractor. When an admin
//! token is configured the request must carry `Authorization: Bearer <token>`;
//! the comparison runs in constant time. Without a configured token the
//! extractor always succeeds.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the caller may mutate the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminAuth;

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.admin_token.as_deref() else {
            return Ok(AdminAuth);
        };

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        match header_value {
            Some(value) => match value.strip_prefix("Bearer ") {
                Some(provided) if constant_time_token_eq(provided, expected) => Ok(AdminAuth),
                Some(_) => {
                    tracing::warn!("authentication failed: invalid bearer token");
                    Err(AppError::Unauthorized("invalid bearer token".into()))
                }
                None => {
                    tracing::warn!("authentication failed: non-Bearer authorization scheme");
                    Err(AppError::Unauthorized(
                        "authorization header must use Bearer scheme".into(),
                    ))
                }
            },
            None => {
                tracing::warn!("authentication failed: missing authorization header");
                Err(AppError::Unauthorized("missing authorization header".into()))
            }
        }
    }
}

/// Constant-time comparison of bearer tokens.
///
/// When lengths differ a dummy comparison still runs so the early return
/// does not stand out in timing.
fn constant_time_token_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

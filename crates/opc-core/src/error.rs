//! # Error Types
//!
//! Validation failures raised when raw integers cross into the domain.
//! Registry, optimizer, and API errors live next to the code that raises
//! them and wrap these where a raw value was rejected.

use thiserror::Error;

/// A raw value failed domain validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Pack sizes must be strictly positive.
    #[error("pack size must be greater than zero: got {0}")]
    InvalidPackSize(i64),

    /// Order quantities must be strictly positive.
    #[error("order size must be greater than zero: got {0}")]
    InvalidOrder(i64),
}

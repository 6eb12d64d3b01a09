//! # Registry and Calculation Errors

use opc_core::{PackSize, ValidationError};
use opc_optimizer::OptimizeError;
use thiserror::Error;

/// Errors from registry mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The requested size is not a positive integer.
    #[error("invalid pack size: {0}")]
    InvalidSize(#[from] ValidationError),

    /// The size is already registered.
    #[error("pack size {0} already exists")]
    Duplicate(PackSize),

    /// The size is not registered.
    #[error("pack size {0} not found")]
    NotFound(PackSize),
}

/// Errors from calculating a shipment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculateError {
    /// The order quantity is not a positive integer.
    #[error("invalid order: {0}")]
    InvalidOrder(ValidationError),

    /// The registry snapshot used for the calculation was empty.
    #[error("no pack sizes configured")]
    NoPackSizesConfigured,

    /// The optimizer rejected the problem.
    #[error("optimization failed: {0}")]
    Optimizer(OptimizeError),
}

impl From<OptimizeError> for CalculateError {
    fn from(err: OptimizeError) -> Self {
        match err {
            OptimizeError::NoPackSizesConfigured => Self::NoPackSizesConfigured,
            other => Self::Optimizer(other),
        }
    }
}

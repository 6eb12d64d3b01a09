//! # Optimizer Errors

use thiserror::Error;

/// Errors from pack optimization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptimizeError {
    /// The size set handed to the optimizer was empty.
    #[error("no pack sizes configured")]
    NoPackSizesConfigured,

    /// The pack sizes would need a search larger than the configured budget.
    #[error("search space of {required} states exceeds the limit of {limit}")]
    SearchSpaceTooLarge {
        /// States the search would allocate.
        required: u64,
        /// Configured maximum.
        limit: u64,
    },

    /// A shipped total does not fit in `u64`.
    #[error("arithmetic overflow computing shipment totals")]
    Overflow,

    /// The search produced a result that violates its own invariants.
    /// Indicates a defect, not bad input.
    #[error("optimizer invariant violated: {0}")]
    Inconsistent(String),
}

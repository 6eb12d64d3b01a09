//! # opc-registry: Pack Registry and Calculator
//!
//! Holds the mutable set of allowed pack sizes and exposes the operations
//! the rest of the system is built on:
//!
//! - `list_pack_sizes()`: current sizes, ascending.
//! - `add_pack_size(size)`: fails on non-positive or duplicate sizes.
//! - `remove_pack_size(size)`: fails when the size is absent.
//! - `calculate(order)`: shipment for an order against one snapshot.
//!
//! ## Snapshots
//!
//! The registry never hands out a lock. Readers get an `Arc<PackSnapshot>`
//! that stays valid and unchanged for as long as they hold it; mutators build
//! the next snapshot and swap the pointer. A calculation therefore sees the
//! registry either entirely before or entirely after any concurrent mutation.
//!
//! ## Duplicates
//!
//! Adding a size that is already present fails with
//! [`RegistryError::Duplicate`]; it is not a silent no-op.

pub mod calculator;
pub mod error;
pub mod registry;

pub use calculator::PackCalculator;
pub use error::{CalculateError, RegistryError};
pub use registry::{PackRegistry, PackSnapshot, DEFAULT_PACK_SIZES};

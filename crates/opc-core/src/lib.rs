//! # opc-core: Foundational Types for the Order Packs Calculator
//!
//! Defines the domain primitives shared by every other crate in the
//! workspace. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Validated newtypes.** `PackSize` and `OrderQuantity` can only be
//!    constructed through checked constructors. A zero or negative pack size
//!    is unrepresentable past the boundary.
//!
//! 2. **Immutable size sets.** `PackSizeSet` is duplicate-free and iterates in
//!    ascending order, so every consumer sees the same deterministic order.
//!
//! 3. **Shipments carry their order.** A `Shipment` knows the quantity it was
//!    computed for, so overage is derived rather than passed around.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `opc-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Domain types derive `Debug`, `Clone`, `Serialize` and `Deserialize`.
//! - The `openapi` feature adds `utoipa::ToSchema` to wire types.

pub mod error;
pub mod pack;
pub mod shipment;

pub use error::ValidationError;
pub use pack::{OrderQuantity, PackSize, PackSizeSet};
pub use shipment::{Shipment, ShipmentSummary};

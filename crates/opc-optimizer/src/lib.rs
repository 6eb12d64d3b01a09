//! # opc-optimizer: Pack Optimization Engine
//!
//! Given an order quantity and a set of allowed pack sizes, computes the
//! shipment that satisfies, in strict priority order:
//!
//! 1. **Coverage**: at least the ordered quantity is shipped.
//! 2. **Minimal overage**: the shipped total is the smallest achievable
//!    value at or above the order.
//! 3. **Minimal pack count**: fewest packs among shipments tied on (2).
//! 4. **Deterministic tie-break**: among remaining ties, the count vector
//!    read from the largest size downwards is lexicographically largest.
//!
//! ## Why not greedy
//!
//! "Largest pack that fits" is wrong for some size sets. With `{23, 31, 53}`
//! and an order of 63, greedy ships `53 + 23 = 76` while `3 × 23 = 69` is
//! achievable. The engine runs an exact search; [`greedy`] is kept only as a
//! comparison baseline.
//!
//! ## Search
//!
//! Sizes and order are first divided by the GCD of the sizes. With `M` the
//! largest reduced size and `s₂` the runner-up, any minimum-pack shipment has
//! at most `M - 1` packs smaller than `M`, so its non-largest part sums to at
//! most `B = (M - 1)·s₂`.
//!
//! - Targets below `B` use an exact shortest-combination table over totals
//!   `[0, target + M)` (`table`).
//! - Targets at or above `B` use Dijkstra over residues modulo `M`
//!   (`residue`); the rest of the order is filled with largest packs. Cost is
//!   bounded by `M`, independent of the order magnitude.
//!
//! Both strategies share the same tie-break, so results agree at the
//! switch-over.
//!
//! ## Crate Policy
//!
//! - Pure functions of `(order, sizes)`; no shared state, no locking.
//! - No `panic!()` or `.unwrap()` outside tests. Internal inconsistencies
//!   surface as [`OptimizeError::Inconsistent`].

pub mod engine;
pub mod error;
pub mod greedy;
mod residue;
mod table;

pub use engine::{optimize, Optimizer, SearchLimits};
pub use error::OptimizeError;

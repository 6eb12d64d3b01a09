//! # opc-cli: Command-Line Pack Calculator
//!
//! Runs the optimizer offline against an explicit size list, without a
//! registry or a server.
//!
//! ## Subcommands
//!
//! - `opc calculate`: Shipment for one order.
//! - `opc compare`: Optimizer against the largest-first heuristic.
//!
//! ```bash
//! opc calculate --sizes 23,31,53 --order 63
//! opc compare --sizes 250,500,1000,2000,5000 --order 12001 --json
//! ```

pub mod calculate;
pub mod compare;

use anyhow::{Context, Result};
use opc_core::{OrderQuantity, PackSize, PackSizeSet, Shipment};
use opc_optimizer::{Optimizer, SearchLimits};

/// Validate raw sizes into a set. Repeated sizes collapse.
pub fn pack_size_set(raw: &[i64]) -> Result<PackSizeSet> {
    raw.iter()
        .map(|&size| PackSize::try_from(size).with_context(|| format!("invalid --sizes entry {size}")))
        .collect()
}

/// Validate a raw order quantity.
pub fn order_quantity(raw: i64) -> Result<OrderQuantity> {
    OrderQuantity::try_from(raw).context("invalid --order")
}

/// Optimizer with an optional budget override.
pub fn optimizer(max_states: Option<usize>) -> Optimizer {
    match max_states {
        Some(max_states) => Optimizer::new(SearchLimits { max_states }),
        None => Optimizer::default(),
    }
}

/// One line per pack size, largest first, e.g. `  2 x 5000`.
pub fn pack_lines(shipment: &Shipment) -> Vec<String> {
    shipment
        .packs()
        .iter()
        .rev()
        .map(|(size, count)| format!("  {count} x {size}"))
        .collect()
}

//! # Greedy Baseline
//!
//! "Largest pack that fits" heuristic: repeatedly take as many of the largest
//! pack not exceeding the remaining quantity as possible, then cover any
//! remainder smaller than every pack with one smallest pack.
//!
//! Not optimal. Kept so callers can show how far the heuristic lands from
//! [`crate::optimize`] for a given size set.

use std::collections::BTreeMap;

use opc_core::{OrderQuantity, PackSize, PackSizeSet, Shipment};

use crate::error::OptimizeError;

/// Compute the greedy shipment for `order`.
pub fn largest_first(
    order: OrderQuantity,
    sizes: &PackSizeSet,
) -> Result<Shipment, OptimizeError> {
    let smallest = sizes
        .iter()
        .next()
        .ok_or(OptimizeError::NoPackSizesConfigured)?;

    let mut counts: BTreeMap<PackSize, u64> = BTreeMap::new();
    let mut remaining = order.get();
    while remaining > 0 {
        match sizes.iter().rev().find(|size| size.get() <= remaining) {
            Some(size) => {
                let taken = remaining / size.get();
                *counts.entry(size).or_default() += taken;
                remaining -= taken * size.get();
            }
            None => {
                *counts.entry(smallest).or_default() += 1;
                remaining = 0;
            }
        }
    }

    Ok(Shipment::new(order, counts))
}

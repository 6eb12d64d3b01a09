//! # Shipment
//!
//! The computed answer to an order: how many packs of each size to send.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pack::{OrderQuantity, PackSize};

/// Packs shipped for one order, keyed by pack size.
///
/// Only non-zero counts are stored, so two shipments with the same packs
/// compare equal regardless of how they were assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    order: OrderQuantity,
    packs: BTreeMap<PackSize, u64>,
}

impl Shipment {
    /// Build a shipment. Zero counts are dropped; repeated sizes are summed.
    pub fn new(order: OrderQuantity, packs: impl IntoIterator<Item = (PackSize, u64)>) -> Self {
        let mut merged: BTreeMap<PackSize, u64> = BTreeMap::new();
        for (size, count) in packs {
            if count > 0 {
                let slot = merged.entry(size).or_default();
                *slot = slot.saturating_add(count);
            }
        }
        Self {
            order,
            packs: merged,
        }
    }

    /// The order this shipment was computed for.
    pub fn order(&self) -> OrderQuantity {
        self.order
    }

    /// Pack counts keyed by size, smallest size first.
    pub fn packs(&self) -> &BTreeMap<PackSize, u64> {
        &self.packs
    }

    /// Number of packs of `size` in the shipment (0 if none).
    pub fn count_of(&self, size: PackSize) -> u64 {
        self.packs.get(&size).copied().unwrap_or(0)
    }

    /// Total items shipped across all packs.
    pub fn total_items(&self) -> u64 {
        self.packs
            .iter()
            .map(|(size, count)| size.get().saturating_mul(*count))
            .fold(0u64, u64::saturating_add)
    }

    /// Total number of packs shipped.
    pub fn total_packs(&self) -> u64 {
        self.packs.values().copied().fold(0u64, u64::saturating_add)
    }

    /// Items shipped beyond the order quantity.
    pub fn overage(&self) -> u64 {
        self.total_items().saturating_sub(self.order.get())
    }

    /// Whether the shipment holds at least the ordered quantity.
    pub fn covers_order(&self) -> bool {
        self.total_items() >= self.order.get()
    }
}

/// Wire summary of a shipment: pack counts keyed by decimal size plus the
/// derived totals. Shared by the HTTP response and the CLI's JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ShipmentSummary {
    pub order_size: u64,
    /// Pack count keyed by pack size (as a decimal string).
    pub packs: BTreeMap<String, u64>,
    pub total_items: u64,
    pub total_packs: u64,
    pub overage: u64,
}

impl From<&Shipment> for ShipmentSummary {
    fn from(shipment: &Shipment) -> Self {
        Self {
            order_size: shipment.order().get(),
            packs: shipment
                .packs()
                .iter()
                .map(|(size, count)| (size.to_string(), *count))
                .collect(),
            total_items: shipment.total_items(),
            total_packs: shipment.total_packs(),
            overage: shipment.overage(),
        }
    }
}

//! # Pack Calculator
//!
//! The boundary the service and any other caller talk to. Accepts raw signed
//! integers as they arrive from the outside, validates them into domain types,
//! and runs each calculation against exactly one registry snapshot.

use std::sync::Arc;

use opc_core::{OrderQuantity, PackSize, Shipment};
use opc_optimizer::Optimizer;

use crate::error::{CalculateError, RegistryError};
use crate::registry::{PackRegistry, PackSnapshot};

/// Registry plus optimizer. Cheap to clone; clones share the registry.
#[derive(Debug, Clone, Default)]
pub struct PackCalculator {
    registry: PackRegistry,
    optimizer: Optimizer,
}

impl PackCalculator {
    pub fn new(registry: PackRegistry, optimizer: Optimizer) -> Self {
        Self {
            registry,
            optimizer,
        }
    }

    pub fn registry(&self) -> &PackRegistry {
        &self.registry
    }

    pub fn optimizer(&self) -> &Optimizer {
        &self.optimizer
    }

    /// Current pack sizes, ascending.
    pub fn list_pack_sizes(&self) -> Vec<PackSize> {
        self.registry.list()
    }

    /// Register a pack size given as a raw integer.
    pub fn add_pack_size(&self, size: i64) -> Result<Arc<PackSnapshot>, RegistryError> {
        let size = PackSize::try_from(size)?;
        self.registry.add(size)
    }

    /// Unregister a pack size given as a raw integer.
    ///
    /// A non-positive value can never be registered, but it is reported as
    /// [`RegistryError::InvalidSize`] rather than `NotFound` so callers can
    /// tell a malformed request from a stale one.
    pub fn remove_pack_size(&self, size: i64) -> Result<Arc<PackSnapshot>, RegistryError> {
        let size = PackSize::try_from(size)?;
        self.registry.remove(size)
    }

    /// Compute the shipment for a raw order quantity.
    pub fn calculate(&self, order: i64) -> Result<Shipment, CalculateError> {
        let order = OrderQuantity::try_from(order).map_err(CalculateError::InvalidOrder)?;
        self.calculate_order(order)
    }

    /// Compute the shipment for a validated order quantity.
    pub fn calculate_order(&self, order: OrderQuantity) -> Result<Shipment, CalculateError> {
        let snapshot = self.registry.snapshot();
        if snapshot.is_empty() {
            return Err(CalculateError::NoPackSizesConfigured);
        }
        let shipment = self.optimizer.optimize(order, snapshot.sizes())?;
        tracing::debug!(
            order = order.get(),
            snapshot_version = snapshot.version(),
            total_packs = shipment.total_packs(),
            overage = shipment.overage(),
            "calculated shipment"
        );
        Ok(shipment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opc_core::ValidationError;
    use opc_optimizer::{OptimizeError, SearchLimits};

    fn counts(shipment: &Shipment) -> Vec<(u64, u64)> {
        shipment
            .packs()
            .iter()
            .rev()
            .map(|(size, count)| (size.get(), *count))
            .collect()
    }

    #[test]
    fn default_catalogue_orders() {
        let calculator = PackCalculator::default();
        assert_eq!(counts(&calculator.calculate(1).unwrap()), vec![(250, 1)]);
        assert_eq!(counts(&calculator.calculate(251).unwrap()), vec![(500, 1)]);
        assert_eq!(
            counts(&calculator.calculate(501).unwrap()),
            vec![(500, 1), (250, 1)]
        );
        assert_eq!(
            counts(&calculator.calculate(12_001).unwrap()),
            vec![(5000, 2), (2000, 1), (250, 1)]
        );
    }

    #[test]
    fn single_size_registry() {
        let calculator = PackCalculator::new(PackRegistry::empty(), Optimizer::default());
        calculator.add_pack_size(250).unwrap();
        assert_eq!(counts(&calculator.calculate(251).unwrap()), vec![(250, 2)]);
    }

    #[test]
    fn repeated_calculation_is_identical() {
        let calculator = PackCalculator::default();
        let first = calculator.calculate(7_777).unwrap();
        let second = calculator.calculate(7_777).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn calculation_follows_registry_changes() {
        let calculator = PackCalculator::new(PackRegistry::empty(), Optimizer::default());
        for size in [23, 31, 53] {
            calculator.add_pack_size(size).unwrap();
        }
        assert_eq!(counts(&calculator.calculate(63).unwrap()), vec![(23, 3)]);

        calculator.remove_pack_size(23).unwrap();
        // {31, 53}: 62 falls short, so the next reachable total is 84.
        assert_eq!(
            counts(&calculator.calculate(63).unwrap()),
            vec![(53, 1), (31, 1)]
        );
    }

    #[test]
    fn non_positive_order_is_rejected() {
        let calculator = PackCalculator::default();
        assert_eq!(
            calculator.calculate(0).unwrap_err(),
            CalculateError::InvalidOrder(ValidationError::InvalidOrder(0))
        );
        assert_eq!(
            calculator.calculate(-5).unwrap_err(),
            CalculateError::InvalidOrder(ValidationError::InvalidOrder(-5))
        );
    }

    #[test]
    fn empty_registry_fails_calculation() {
        let calculator = PackCalculator::new(PackRegistry::empty(), Optimizer::default());
        assert_eq!(
            calculator.calculate(10).unwrap_err(),
            CalculateError::NoPackSizesConfigured
        );
    }

    #[test]
    fn removing_last_size_is_allowed_but_blocks_calculation() {
        let calculator = PackCalculator::new(
            PackRegistry::new([PackSize::new(10).unwrap()]),
            Optimizer::default(),
        );
        let snapshot = calculator.remove_pack_size(10).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(
            calculator.calculate(1).unwrap_err(),
            CalculateError::NoPackSizesConfigured
        );
    }

    #[test]
    fn raw_size_validation() {
        let calculator = PackCalculator::default();
        assert_eq!(
            calculator.add_pack_size(0).unwrap_err(),
            RegistryError::InvalidSize(ValidationError::InvalidPackSize(0))
        );
        assert_eq!(
            calculator.remove_pack_size(-1).unwrap_err(),
            RegistryError::InvalidSize(ValidationError::InvalidPackSize(-1))
        );
        assert!(matches!(
            calculator.add_pack_size(500).unwrap_err(),
            RegistryError::Duplicate(_)
        ));
        assert!(matches!(
            calculator.remove_pack_size(42).unwrap_err(),
            RegistryError::NotFound(_)
        ));
    }

    #[test]
    fn small_order_with_huge_largest_size() {
        let calculator = PackCalculator::new(PackRegistry::empty(), Optimizer::default());
        calculator.add_pack_size(1).unwrap();
        calculator.add_pack_size(5_000_000).unwrap();
        assert_eq!(counts(&calculator.calculate(10).unwrap()), vec![(1, 10)]);
    }

    #[test]
    fn optimizer_budget_surfaces_as_optimizer_error() {
        let calculator = PackCalculator::new(
            PackRegistry::new([PackSize::new(97).unwrap(), PackSize::new(101).unwrap()]),
            Optimizer::new(SearchLimits { max_states: 64 }),
        );
        assert!(matches!(
            calculator.calculate(500).unwrap_err(),
            CalculateError::Optimizer(OptimizeError::SearchSpaceTooLarge { .. })
        ));
    }
}

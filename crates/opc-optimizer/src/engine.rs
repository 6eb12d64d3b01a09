//! # Optimizer Entry Point
//!
//! Reduces the problem by the GCD of the pack sizes, picks the table or
//! residue strategy from the non-largest bound, and scales the result back
//! into a [`Shipment`].

use opc_core::{OrderQuantity, PackSize, PackSizeSet, Shipment};

use crate::error::OptimizeError;
use crate::{residue, table};

/// Upper bound on the states a single optimization may allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum table length (bounded strategy) or residue count (residue
    /// strategy).
    pub max_states: usize,
}

impl SearchLimits {
    /// Default budget: 4 Mi states.
    pub const DEFAULT_MAX_STATES: usize = 1 << 22;
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_states: Self::DEFAULT_MAX_STATES,
        }
    }
}

/// Pack optimizer. Stateless apart from its search budget; share freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optimizer {
    limits: SearchLimits,
}

impl Optimizer {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Compute the shipment for `order` using only `sizes`.
    pub fn optimize(
        &self,
        order: OrderQuantity,
        sizes: &PackSizeSet,
    ) -> Result<Shipment, OptimizeError> {
        if sizes.is_empty() {
            return Err(OptimizeError::NoPackSizesConfigured);
        }

        let raw: Vec<u64> = sizes.iter().map(PackSize::get).collect();
        let unit = raw.iter().copied().fold(0, gcd);
        let units: Vec<u64> = raw.iter().map(|size| size / unit).collect();
        let target = order.get().div_ceil(unit);

        let largest = units[units.len() - 1];
        let runner_up = if units.len() > 1 {
            units[units.len() - 2]
        } else {
            0
        };
        let bound = (largest - 1)
            .checked_mul(runner_up)
            .ok_or(OptimizeError::Overflow)?;

        let counts = if target < bound {
            let window = table::window_len(target, &units)?;
            if window <= self.limits.max_states as u64 {
                tracing::trace!(reduced_order = target, bound, window, "bounded table search");
                table::solve(target, &units, self.limits.max_states)?
            } else {
                // The residue labels usually fit below the bound too; only
                // fall back to an error when the cheapest one does not.
                tracing::trace!(reduced_order = target, bound, modulus = largest, "residue search below bound");
                residue::try_solve(target, &units, self.limits.max_states)?.ok_or(
                    OptimizeError::SearchSpaceTooLarge {
                        required: window,
                        limit: self.limits.max_states as u64,
                    },
                )?
            }
        } else {
            tracing::trace!(reduced_order = target, bound, modulus = largest, "residue search");
            residue::solve(target, &units, self.limits.max_states)?
        };

        // Every pack must fit in u64 once scaled back.
        counts
            .iter()
            .zip(&raw)
            .try_fold(0u64, |acc, (&count, &size)| {
                size.checked_mul(count).and_then(|part| acc.checked_add(part))
            })
            .ok_or(OptimizeError::Overflow)?;

        let shipment = Shipment::new(order, sizes.iter().zip(counts));
        if !shipment.covers_order() {
            return Err(OptimizeError::Inconsistent(format!(
                "shipment of {} items does not cover order {}",
                shipment.total_items(),
                order
            )));
        }

        tracing::debug!(
            order = order.get(),
            total_items = shipment.total_items(),
            total_packs = shipment.total_packs(),
            overage = shipment.overage(),
            "optimized shipment"
        );
        Ok(shipment)
    }
}

/// Optimize with the default search budget.
pub fn optimize(order: OrderQuantity, sizes: &PackSizeSet) -> Result<Shipment, OptimizeError> {
    Optimizer::default().optimize(order, sizes)
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greedy;

    fn sizes(values: &[u64]) -> PackSizeSet {
        values.iter().map(|&v| PackSize::new(v).unwrap()).collect()
    }

    fn order(n: u64) -> OrderQuantity {
        OrderQuantity::new(n).unwrap()
    }

    fn packs(shipment: &Shipment) -> Vec<(u64, u64)> {
        shipment
            .packs()
            .iter()
            .rev()
            .map(|(size, count)| (size.get(), *count))
            .collect()
    }

    const DEFAULT_CATALOGUE: [u64; 5] = [250, 500, 1000, 2000, 5000];

    #[test]
    fn default_catalogue_reference_orders() {
        let set = sizes(&DEFAULT_CATALOGUE);
        let cases: [(u64, &[(u64, u64)]); 6] = [
            (1, &[(250, 1)]),
            (250, &[(250, 1)]),
            (251, &[(500, 1)]),
            (501, &[(500, 1), (250, 1)]),
            (12_001, &[(5000, 2), (2000, 1), (250, 1)]),
            (250_000, &[(5000, 50)]),
        ];
        for (quantity, expected) in cases {
            let shipment = optimize(order(quantity), &set).unwrap();
            assert_eq!(packs(&shipment), expected.to_vec(), "order {quantity}");
        }
    }

    #[test]
    fn single_size_rounds_up() {
        let shipment = optimize(order(251), &sizes(&[250])).unwrap();
        assert_eq!(packs(&shipment), vec![(250, 2)]);
        assert_eq!(shipment.overage(), 249);
    }

    #[test]
    fn single_size_matches_ceiling_division() {
        for quantity in [1, 6, 7, 8, 1_000_003] {
            let shipment = optimize(order(quantity), &sizes(&[7])).unwrap();
            assert_eq!(shipment.count_of(PackSize::new(7).unwrap()), quantity.div_ceil(7));
        }
    }

    #[test]
    fn order_equal_to_a_pack_size_ships_one_pack() {
        let set = sizes(&[23, 31, 53]);
        for quantity in [23, 31, 53] {
            let shipment = optimize(order(quantity), &set).unwrap();
            assert_eq!(shipment.total_packs(), 1);
            assert_eq!(shipment.overage(), 0);
        }
    }

    #[test]
    fn beats_greedy_where_greedy_overships() {
        let set = sizes(&[23, 31, 53]);
        let optimal = optimize(order(63), &set).unwrap();
        assert_eq!(packs(&optimal), vec![(23, 3)]);
        assert_eq!(optimal.total_items(), 69);

        let heuristic = greedy::largest_first(order(63), &set).unwrap();
        assert_eq!(heuristic.total_items(), 76);
        assert!(heuristic.overage() > optimal.overage());
    }

    #[test]
    fn beats_greedy_where_greedy_uses_more_packs() {
        let set = sizes(&DEFAULT_CATALOGUE);
        let optimal = optimize(order(251), &set).unwrap();
        let heuristic = greedy::largest_first(order(251), &set).unwrap();
        assert_eq!(optimal.total_items(), heuristic.total_items());
        assert!(optimal.total_packs() < heuristic.total_packs());
    }

    #[test]
    fn zero_overage_outranks_fewer_packs() {
        // 9 = 3 × 3 exactly; a single 10 would be one pack with overage 1.
        let shipment = optimize(order(9), &sizes(&[3, 10])).unwrap();
        assert_eq!(packs(&shipment), vec![(3, 3)]);
    }

    #[test]
    fn gcd_reduction_handles_non_multiples() {
        // 10, 15, 20, 50, 100: order 23 needs 25 = 15 + 10.
        let set = sizes(&[10, 15, 20, 50, 100]);
        let shipment = optimize(order(23), &set).unwrap();
        assert_eq!(shipment.total_items(), 25);
        assert_eq!(packs(&shipment), vec![(15, 1), (10, 1)]);

        let shipment = optimize(order(111), &set).unwrap();
        assert_eq!(packs(&shipment), vec![(100, 1), (15, 1)]);
    }

    #[test]
    fn huge_order_stays_bounded() {
        let set = sizes(&[23, 31, 53]);
        let quantity = 1_000_000_000_000_000_007;
        let shipment = optimize(order(quantity), &set).unwrap();
        assert_eq!(shipment.total_items(), quantity);
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(
            optimize(order(5), &PackSizeSet::new()).unwrap_err(),
            OptimizeError::NoPackSizesConfigured
        );
    }

    #[test]
    fn overflowing_totals_are_reported() {
        let set = sizes(&[u64::MAX / 2 + 1]);
        assert_eq!(
            optimize(order(u64::MAX), &set).unwrap_err(),
            OptimizeError::Overflow
        );
    }

    #[test]
    fn budget_exhaustion_is_reported() {
        let optimizer = Optimizer::new(SearchLimits { max_states: 64 });
        let err = optimizer
            .optimize(order(500), &sizes(&[97, 101]))
            .unwrap_err();
        assert!(matches!(err, OptimizeError::SearchSpaceTooLarge { .. }));
    }

    #[test]
    fn huge_largest_size_does_not_block_small_orders() {
        let shipment = optimize(order(10), &sizes(&[1, 5_000_000])).unwrap();
        assert_eq!(packs(&shipment), vec![(1, 10)]);
    }

    #[test]
    fn large_order_below_the_bound_stays_within_budget() {
        // gcd 1, bound 4999 × 4999; the order is below it and the table
        // window would exceed the default budget.
        let set = sizes(&[250, 500, 1000, 2000, 4999, 5000]);
        let shipment = optimize(order(5_000_000), &set).unwrap();
        assert_eq!(packs(&shipment), vec![(5000, 1000)]);

        let shipment = optimize(order(5_000_001), &set).unwrap();
        assert_eq!(shipment.overage(), 0);
        // 249 × 4999 + 250 covers residue 1 in the fewest extra packs.
        assert_eq!(shipment.total_packs(), 1_001);
    }

    #[test]
    fn residue_labels_below_the_bound_match_the_table() {
        for units in [&[2u64, 9, 10][..], &[3, 5], &[4, 6, 9], &[23, 31, 53], &[5, 7, 11, 13]] {
            let largest = units[units.len() - 1];
            let bound = (largest - 1) * units[units.len() - 2];
            for target in 1..bound {
                if let Some(from_residue) = residue::try_solve(target, units, 1 << 20).unwrap() {
                    let from_table = table::solve(target, units, 1 << 20).unwrap();
                    assert_eq!(from_residue, from_table, "units {units:?} target {target}");
                }
            }
        }
    }

    #[test]
    fn strategies_agree_at_and_above_the_bound() {
        for units in [&[3u64, 5][..], &[4, 6, 9], &[1, 2, 4, 8, 20], &[23, 31, 53], &[5, 7, 11, 13]] {
            let largest = units[units.len() - 1];
            let bound = (largest - 1) * units[units.len() - 2];
            for target in bound..bound + 2 * largest {
                let from_table = table::solve(target, units, 1 << 20).unwrap();
                let from_residue = residue::solve(target, units, 1 << 20).unwrap();
                assert_eq!(from_table, from_residue, "units {units:?} target {target}");
            }
        }
    }

    /// Reference answer by unbounded coin DP over every total up to
    /// `order + max`: `(total, packs)` of the best shipment.
    fn reference(order: u64, values: &[u64]) -> (u64, u64) {
        let max = *values.iter().max().unwrap();
        let len = (order + max) as usize;
        let mut best: Vec<Option<u64>> = vec![None; len];
        best[0] = Some(0);
        for t in 1..len {
            best[t] = values
                .iter()
                .filter(|&&v| v as usize <= t)
                .filter_map(|&v| best[t - v as usize].map(|p| p + 1))
                .min();
        }
        (order as usize..len)
            .find_map(|t| best[t].map(|p| (t as u64, p)))
            .unwrap()
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Total is the smallest achievable value at or above the order,
            /// and the pack count is minimal for that total.
            #[test]
            fn matches_reference(
                values in prop::collection::btree_set(1u64..60, 1..5),
                quantity in 1u64..2_000,
            ) {
                let values: Vec<u64> = values.into_iter().collect();
                let shipment = optimize(order(quantity), &sizes(&values)).unwrap();
                let (total, pack_count) = reference(quantity, &values);
                prop_assert_eq!(shipment.total_items(), total);
                prop_assert_eq!(shipment.total_packs(), pack_count);
            }

            /// Repeated calls with identical input return identical output.
            #[test]
            fn deterministic(
                values in prop::collection::btree_set(1u64..200, 1..6),
                quantity in 1u64..100_000,
            ) {
                let set: PackSizeSet = values.into_iter().map(|v| PackSize::new(v).unwrap()).collect();
                let a = optimize(order(quantity), &set).unwrap();
                let b = optimize(order(quantity), &set).unwrap();
                prop_assert_eq!(a, b);
            }

            /// Only sizes from the set are shipped.
            #[test]
            fn ships_only_configured_sizes(
                values in prop::collection::btree_set(1u64..500, 1..6),
                quantity in 1u64..1_000_000,
            ) {
                let set: PackSizeSet = values.into_iter().map(|v| PackSize::new(v).unwrap()).collect();
                let shipment = optimize(order(quantity), &set).unwrap();
                prop_assert!(shipment.covers_order());
                for size in shipment.packs().keys() {
                    prop_assert!(set.contains(*size));
                }
            }
        }
    }
}

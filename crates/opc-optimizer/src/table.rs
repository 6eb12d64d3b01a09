//! Exact shortest-combination table over totals `[0, target + smallest)`.
//!
//! Used below the non-largest bound when the table fits the budget. Each
//! pack size is an edge of weight 1 from total `t` to `t + size`;
//! `min_packs[t]` is the fewest packs summing to exactly `t`.

use crate::error::OptimizeError;

const UNREACHABLE: u32 = u32::MAX;

/// Solve for `target` over `units` (ascending, distinct, GCD-reduced).
///
/// Returns pack counts aligned with `units`.
pub(crate) fn solve(target: u64, units: &[u64], max_states: usize) -> Result<Vec<u64>, OptimizeError> {
    // ceil(target / smallest) packs of the smallest size land in
    // [target, target + smallest), so the optimum does too.
    let required = window_len(target, units)?;
    let limit = (max_states as u64).min(u64::from(UNREACHABLE));
    if required > limit {
        return Err(OptimizeError::SearchSpaceTooLarge { required, limit });
    }
    let len = required as usize;
    let target = target as usize;

    let mut min_packs = vec![UNREACHABLE; len];
    min_packs[0] = 0;
    for t in 1..len {
        let mut best = UNREACHABLE;
        for &size in units {
            let size = size as usize;
            if size > t {
                break;
            }
            let prev = min_packs[t - size];
            if prev != UNREACHABLE && prev + 1 < best {
                best = prev + 1;
            }
        }
        min_packs[t] = best;
    }

    let total = (target..len)
        .find(|&t| min_packs[t] != UNREACHABLE)
        .ok_or_else(|| {
            OptimizeError::Inconsistent(format!("no reachable total in [{target}, {len})"))
        })?;

    // Walk back taking the largest size that stays on a shortest path. The
    // sizes taken are non-increasing, which yields the lexicographically
    // largest count vector among minimum-pack combinations.
    let mut counts = vec![0u64; units.len()];
    let mut t = total;
    while t > 0 {
        let need = min_packs[t] - 1;
        let (index, size) = units
            .iter()
            .enumerate()
            .rev()
            .map(|(i, &s)| (i, s as usize))
            .find(|&(_, s)| s <= t && min_packs[t - s] == need)
            .ok_or_else(|| {
                OptimizeError::Inconsistent(format!("no predecessor for total {t}"))
            })?;
        counts[index] += 1;
        t -= size;
    }

    Ok(counts)
}

/// Table length needed for `target`: totals `[0, target + smallest)`.
pub(crate) fn window_len(target: u64, units: &[u64]) -> Result<u64, OptimizeError> {
    let smallest = *units
        .first()
        .ok_or(OptimizeError::NoPackSizesConfigured)?;
    target.checked_add(smallest).ok_or(OptimizeError::Overflow)
}

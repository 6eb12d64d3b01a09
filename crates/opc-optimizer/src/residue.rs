//! Dijkstra over residues modulo the largest pack size.
//!
//! A pack of size `s` smaller than the largest `M` moves residue `r` to
//! `(r + s) mod M` at cost `M - s`. For a fixed total `T` reached with a
//! non-largest part `N`, the pack count is `(T - N)/M + k = (T + cost)/M`
//! where `k` is the number of non-largest packs, so minimum cost is minimum
//! pack count. The cheapest label is only usable when its `N` fits inside
//! the total. That always holds once `target >= (M - 1)·s₂`, since optimal
//! paths are simple. Below that bound [`try_solve`] reports when it does not.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::OptimizeError;

/// `(cost, packs, counts)`. Smaller is better; counts of the non-largest
/// sizes (largest first) are compared reversed so more large packs win ties.
type Label = (u64, u64, Reverse<Vec<u32>>);

/// Solve for `target` over `units` (ascending, distinct, GCD-reduced) with
/// `target >= (M - 1)·s₂`.
///
/// Returns pack counts aligned with `units`.
pub(crate) fn solve(target: u64, units: &[u64], max_states: usize) -> Result<Vec<u64>, OptimizeError> {
    try_solve(target, units, max_states)?.ok_or_else(|| {
        OptimizeError::Inconsistent(format!(
            "cheapest remainder exceeds the shipped total for target {target}"
        ))
    })
}

/// Like [`solve`], for any target. `Ok(None)` when the cheapest combination
/// for the chosen total needs more of the non-largest sizes than the total
/// holds; only an exact table can answer then.
pub(crate) fn try_solve(
    target: u64,
    units: &[u64],
    max_states: usize,
) -> Result<Option<Vec<u64>>, OptimizeError> {
    let (&modulus, rest) = units
        .split_last()
        .ok_or(OptimizeError::NoPackSizesConfigured)?;
    if modulus > max_states as u64 {
        return Err(OptimizeError::SearchSpaceTooLarge {
            required: modulus,
            limit: max_states as u64,
        });
    }

    // Non-largest sizes, largest first.
    let smaller: Vec<u64> = rest.iter().rev().copied().collect();
    let reach = smallest_sums(modulus, &smaller);
    let best = shortest_labels(modulus, &smaller);

    // A total t is reachable iff the smallest non-largest sum in its residue
    // class is at most t.
    let window_end = target
        .checked_add(modulus - 1)
        .ok_or(OptimizeError::Overflow)?;
    let (total, label) = (target..=window_end)
        .find_map(|t| {
            let residue = (t % modulus) as usize;
            match (reach[residue], &best[residue]) {
                (Some(sum), Some(label)) if sum <= t => Some((t, label)),
                _ => None,
            }
        })
        .ok_or_else(|| {
            OptimizeError::Inconsistent(format!("no reachable residue in [{target}, {window_end}]"))
        })?;

    let Reverse(counts) = &label.2;
    let remainder = smaller
        .iter()
        .zip(counts)
        .try_fold(0u64, |acc, (&size, &count)| {
            size.checked_mul(u64::from(count))
                .and_then(|part| acc.checked_add(part))
        })
        .ok_or(OptimizeError::Overflow)?;

    let Some(filled) = total.checked_sub(remainder) else {
        return Ok(None);
    };
    if filled % modulus != 0 {
        return Err(OptimizeError::Inconsistent(format!(
            "total {total} minus remainder {remainder} is not a multiple of {modulus}"
        )));
    }

    let mut out = vec![0u64; units.len()];
    let last = units.len() - 1;
    out[last] = filled / modulus;
    for (i, &count) in counts.iter().enumerate() {
        out[last - 1 - i] = u64::from(count);
    }
    Ok(Some(out))
}

/// Smallest sum of non-largest packs per residue, `None` where unreachable.
fn smallest_sums(modulus: u64, smaller: &[u64]) -> Vec<Option<u64>> {
    let m = modulus as usize;
    let mut best: Vec<Option<u64>> = vec![None; m];
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();

    best[0] = Some(0);
    heap.push(Reverse((0, 0)));

    while let Some(Reverse((sum, residue))) = heap.pop() {
        if best[residue].is_some_and(|b| b < sum) {
            continue;
        }
        for &size in smaller {
            let next = ((residue as u64 + size) % modulus) as usize;
            let candidate = sum.saturating_add(size);
            if best[next].map_or(true, |b| candidate < b) {
                best[next] = Some(candidate);
                heap.push(Reverse((candidate, next)));
            }
        }
    }
    best
}

/// Best label per residue, `None` where the residue is unreachable.
fn shortest_labels(modulus: u64, smaller: &[u64]) -> Vec<Option<Label>> {
    let m = modulus as usize;
    let mut best: Vec<Option<Label>> = vec![None; m];
    let mut heap: BinaryHeap<Reverse<(Label, usize)>> = BinaryHeap::new();

    let origin: Label = (0, 0, Reverse(vec![0; smaller.len()]));
    best[0] = Some(origin.clone());
    heap.push(Reverse((origin, 0)));

    while let Some(Reverse((label, residue))) = heap.pop() {
        if best[residue].as_ref().is_some_and(|b| *b < label) {
            continue;
        }
        let (cost, packs, Reverse(counts)) = &label;
        for (i, &size) in smaller.iter().enumerate() {
            let next = ((residue as u64 + size) % modulus) as usize;
            let mut next_counts = counts.clone();
            next_counts[i] += 1;
            let candidate: Label = (cost + (modulus - size), packs + 1, Reverse(next_counts));
            if best[next].as_ref().map_or(true, |b| candidate < *b) {
                best[next] = Some(candidate.clone());
                heap.push(Reverse((candidate, next)));
            }
        }
    }
    best
}

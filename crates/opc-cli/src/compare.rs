//! # Compare Subcommand
//!
//! Runs the optimizer and the largest-first heuristic on the same order and
//! prints both, so a size list that trips the heuristic is easy to spot.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use opc_core::ShipmentSummary;
use opc_optimizer::greedy;
use serde::Serialize;

/// Arguments for the `opc compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Comma-separated pack sizes, e.g. `23,31,53`.
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    pub sizes: Vec<i64>,

    /// Number of items ordered.
    #[arg(long, allow_negative_numbers = true)]
    pub order: i64,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Override the optimizer search budget.
    #[arg(long)]
    pub max_states: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Comparison {
    optimal: ShipmentSummary,
    largest_first: ShipmentSummary,
    heuristic_is_optimal: bool,
}

/// Execute the compare subcommand, writing the result to `out`.
///
/// Exit code 0 when the heuristic matches the optimum, 1 when it is worse.
pub fn run_compare(args: &CompareArgs, out: &mut dyn Write) -> Result<u8> {
    let sizes = crate::pack_size_set(&args.sizes)?;
    let order = crate::order_quantity(args.order)?;
    let optimal = crate::optimizer(args.max_states)
        .optimize(order, &sizes)
        .context("optimization failed")?;
    let heuristic = greedy::largest_first(order, &sizes).context("largest-first failed")?;

    let matches = (heuristic.total_items(), heuristic.total_packs())
        == (optimal.total_items(), optimal.total_packs());

    if args.json {
        let comparison = Comparison {
            optimal: ShipmentSummary::from(&optimal),
            largest_first: ShipmentSummary::from(&heuristic),
            heuristic_is_optimal: matches,
        };
        serde_json::to_writer_pretty(&mut *out, &comparison)?;
        writeln!(out)?;
    } else {
        for (label, shipment) in [("optimal", &optimal), ("largest-first", &heuristic)] {
            writeln!(
                out,
                "{label}: {} packs, {} items, overage {}",
                shipment.total_packs(),
                shipment.total_items(),
                shipment.overage()
            )?;
            for line in crate::pack_lines(shipment) {
                writeln!(out, "{line}")?;
            }
        }
        if matches {
            writeln!(out, "largest-first is optimal for order {order}")?;
        } else {
            writeln!(
                out,
                "largest-first ships {} extra items and {} extra packs",
                heuristic.total_items().saturating_sub(optimal.total_items()),
                heuristic.total_packs() as i128 - optimal.total_packs() as i128
            )?;
        }
    }
    Ok(if matches { 0 } else { 1 })
}

//! # Calculate Subcommand
//!
//! Prints the shipment for one order against an explicit size list.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use opc_core::ShipmentSummary;

/// Arguments for the `opc calculate` subcommand.
#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Comma-separated pack sizes, e.g. `250,500,1000`.
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

/// Execute the calculate subcommand, writing the result to `out`.
pub fn run_calculate(args: &CalculateArgs, out: &mut dyn Write) -> Result<u8> {
    let sizes = crate::pack_size_set(&args.sizes)?;
    let order = crate::order_quantity(args.order)?;
    let shipment = crate::optimizer(args.max_states)
        .optimize(order, &sizes)
        .context("optimization failed")?;

    tracing::debug!(order = order.get(), sizes = sizes.len(), "calculated");

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &ShipmentSummary::from(&shipment))?;
        writeln!(out)?;
    } else {
        writeln!(
            out,
            "order {}: {} packs, {} items, overage {}",
            order,
            shipment.total_packs(),
            shipment.total_items(),
            shipment.overage()
        )?;
        for line in crate::pack_lines(&shipment) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(sizes: &[i64], order: i64, json: bool) -> CalculateArgs {
        CalculateArgs {
            sizes: sizes.to_vec(),
            order,
            json,
            max_states: None,
        }
    }

    fn run(args: &CalculateArgs) -> Result<String> {
        let mut out = Vec::new();
        run_calculate(args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn text_output() {
        let text = run(&args(&[23, 31, 53], 63, false)).unwrap();
        assert_eq!(text, "order 63: 3 packs, 69 items, overage 6\n  3 x 23\n");
    }

    #[test]
    fn json_output() {
        let text = run(&args(&[250, 500, 1000, 2000, 5000], 501, true)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["packs"], serde_json::json!({"500": 1, "250": 1}));
        assert_eq!(json["overage"], 249);
    }

    #[test]
    fn invalid_input_fails() {
        assert!(run(&args(&[0], 10, false)).is_err());
        assert!(run(&args(&[250], -1, false)).is_err());
    }

    #[test]
    fn budget_exhaustion_fails() {
        let mut args = args(&[97, 101], 500, false);
        args.max_states = Some(64);
        let err = run(&args).unwrap_err();
        assert!(format!("{err:#}").contains("search space"));
    }
}

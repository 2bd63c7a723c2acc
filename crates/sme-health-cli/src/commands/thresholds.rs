use clap::Args;
use serde_json::Value;

use crate::input;

/// Arguments for printing the threshold table
#[derive(Args)]
pub struct ThresholdsArgs {
    /// Print only one section (benchmarks, liquidity, weights, zones, compliance, alerts)
    #[arg(long)]
    pub section: Option<String>,
}

pub fn run_thresholds(
    args: ThresholdsArgs,
    thresholds: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let table = input::thresholds::load_thresholds(thresholds)?;
    let value = serde_json::to_value(&table)?;

    let Some(section) = args.section else {
        return Ok(serde_json::json!({ "result": value }));
    };
    let part = value
        .get(&section)
        .cloned()
        .ok_or_else(|| format!("Unknown threshold section '{section}'"))?;
    Ok(serde_json::json!({ "result": part }))
}

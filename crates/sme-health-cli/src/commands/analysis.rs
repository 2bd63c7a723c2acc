use clap::Args;
use serde::Serialize;
use serde_json::Value;

use sme_health_core::analysis::{analyze, AnalysisInput, HealthAnalysis};
use sme_health_core::{ComputationOutput, FinancialSnapshot};

use crate::input;

/// Where the financial snapshots come from.
///
/// `--input` takes a full analysis document (`current`, optional `previous`
/// and `compliance_flags`). `--current` / `--previous` take bare snapshots.
/// Without either, a document or bare snapshot is read from piped stdin.
#[derive(Args)]
pub struct SnapshotArgs {
    /// Path to an analysis input file (JSON or YAML)
    #[arg(long, conflicts_with_all = ["current", "previous"])]
    pub input: Option<String>,

    /// Path to the current-year snapshot (JSON or YAML)
    #[arg(long)]
    pub current: Option<String>,

    /// Path to the previous-year snapshot, enables averages and YoY rules
    #[arg(long, requires = "current")]
    pub previous: Option<String>,
}

fn read_input(args: &SnapshotArgs) -> Result<AnalysisInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_structured(path);
    }
    if let Some(ref path) = args.current {
        let current: FinancialSnapshot = input::file::read_structured(path)?;
        let previous = match args.previous {
            Some(ref p) => Some(input::file::read_structured::<FinancialSnapshot>(p)?),
            None => None,
        };
        return Ok(AnalysisInput {
            current,
            previous,
            compliance_flags: None,
        });
    }
    input::stdin::read_stdin()?
        .ok_or_else(|| "--input or --current is required (or pipe JSON or YAML to stdin)".into())
}

fn run_pipeline(
    args: &SnapshotArgs,
    thresholds: Option<&str>,
) -> Result<ComputationOutput<HealthAnalysis>, Box<dyn std::error::Error>> {
    let analysis_input = read_input(args)?;
    let table = input::thresholds::load_thresholds(thresholds)?;
    Ok(analyze(&analysis_input, &table)?)
}

/// Keep the envelope, swap the result for one part of it.
fn project<T: Serialize>(
    output: ComputationOutput<HealthAnalysis>,
    pick: impl FnOnce(HealthAnalysis) -> T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result: pick(output.result),
        methodology: output.methodology,
        assumptions: output.assumptions,
        warnings: output.warnings,
        metadata: output.metadata,
    }
}

pub fn run_analyze(
    args: SnapshotArgs,
    thresholds: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let result = run_pipeline(&args, thresholds)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_ratios(
    args: SnapshotArgs,
    thresholds: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let result = project(run_pipeline(&args, thresholds)?, |a| a.ratios);
    Ok(serde_json::to_value(result)?)
}

pub fn run_score(
    args: SnapshotArgs,
    thresholds: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let result = project(run_pipeline(&args, thresholds)?, |a| a.score);
    Ok(serde_json::to_value(result)?)
}

pub fn run_recommend(
    args: SnapshotArgs,
    thresholds: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let result = project(run_pipeline(&args, thresholds)?, |a| a.recommendations);
    Ok(serde_json::to_value(result)?)
}

pub fn run_compliance(
    args: SnapshotArgs,
    thresholds: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let result = project(run_pipeline(&args, thresholds)?, |a| a.compliance);
    Ok(serde_json::to_value(result)?)
}

mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::analysis::SnapshotArgs;
use commands::thresholds::ThresholdsArgs;

/// Financial health analysis for Indian SMEs
#[derive(Parser)]
#[command(
    name = "sme-health",
    version,
    about = "Financial health analysis for Indian SMEs",
    long_about = "Derives financial ratios from balance sheet, P&L and cash flow snapshots \
                  (amounts in ₹ Lakhs), scores them into a 0-100 health score with a zone, \
                  and produces prioritised recommendations covering liquidity, leverage, \
                  working capital and Indian statutory compliance."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Threshold table to use instead of the built-in one (JSON or YAML)
    #[arg(long, global = true)]
    thresholds: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis: ratios, score, recommendations and compliance status
    Analyze(SnapshotArgs),
    /// Derive financial ratios only
    Ratios(SnapshotArgs),
    /// Compute the weighted health score and zone
    Score(SnapshotArgs),
    /// Generate prioritised recommendations
    Recommend(SnapshotArgs),
    /// Statutory compliance status by area
    Compliance(SnapshotArgs),
    /// Print (and validate) the active threshold table
    Thresholds(ThresholdsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let thresholds = cli.thresholds.as_deref();
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analysis::run_analyze(args, thresholds),
        Commands::Ratios(args) => commands::analysis::run_ratios(args, thresholds),
        Commands::Score(args) => commands::analysis::run_score(args, thresholds),
        Commands::Recommend(args) => commands::analysis::run_recommend(args, thresholds),
        Commands::Compliance(args) => commands::analysis::run_compliance(args, thresholds),
        Commands::Thresholds(args) => commands::thresholds::run_thresholds(args, thresholds),
        Commands::Version => {
            println!("sme-health {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

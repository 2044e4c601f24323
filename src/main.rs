use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use repara::analysis;
use repara::cli::{Cli, OutputFormat};
use repara::config::{AnalysisConfig, ScoreWeights};
use repara::record::WorkOrderRecord;
use repara::report;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load a cleaned work-order snapshot from a JSON file.
fn load_records(path: &Path) -> Result<Vec<WorkOrderRecord>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let records: Vec<WorkOrderRecord> = serde_json::from_str(&data)
        .with_context(|| format!("invalid work-order snapshot {}", path.display()))?;
    Ok(records)
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let config = AnalysisConfig {
        z_threshold: args.z_threshold,
        iqr_multiplier: args.iqr_multiplier,
        percentile: args.percentile,
        min_consensus: args.min_consensus,
        min_category_size: args.min_category_size,
        weights: ScoreWeights {
            frequency: args.weight_frequency,
            cost: args.weight_cost,
            outlier: args.weight_outlier,
        },
        avg_days_per_month: args.avg_days_per_month,
    };

    let records = load_records(&args.input)?;
    tracing::debug!(records = records.len(), "snapshot loaded");

    let report = analysis::analyze(&records, &config)?;

    match args.format {
        OutputFormat::Text => {
            print!("{}", report::render_summary(&report, args.top, args.all));
            if args.baselines {
                println!();
                print!("{}", report::render_baselines(&report));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

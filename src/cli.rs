//! CLI argument parsing for Repara

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text summary (default)
    Text,
    /// Full report as JSON for downstream reporting collaborators
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "repara")]
#[command(version)]
#[command(about = "Rank maintenance equipment by cost-reduction opportunity", long_about = None)]
pub struct Cli {
    /// JSON snapshot of cleaned, categorized work-order records
    pub input: PathBuf,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Number of equipment rows shown in the ranked table
    #[arg(long = "top", value_name = "N", default_value = "10")]
    pub top: usize,

    /// Show every analyzed equipment, not only consensus outliers
    #[arg(long = "all")]
    pub all: bool,

    /// Print the per-category baseline table
    #[arg(long = "baselines")]
    pub baselines: bool,

    /// Z-score threshold in standard deviations above the category mean
    #[arg(long = "z-threshold", value_name = "SIGMA", default_value = "2.0")]
    pub z_threshold: f64,

    /// Multiplier on the interquartile range for the Tukey upper fence
    #[arg(long = "iqr-multiplier", value_name = "K", default_value = "1.5")]
    pub iqr_multiplier: f64,

    /// Percentile cutoff for the percentile test (90 flags the top 10%)
    #[arg(long = "percentile", value_name = "PCT", default_value = "90.0")]
    pub percentile: f64,

    /// Detection methods that must agree for a consensus outlier
    #[arg(long = "min-consensus", value_name = "N", default_value = "2")]
    pub min_consensus: u8,

    /// Categories smaller than this skip the IQR and percentile tests
    #[arg(long = "min-category-size", value_name = "N", default_value = "3")]
    pub min_category_size: usize,

    /// Composite weight of the normalized repair frequency
    #[arg(long = "weight-frequency", value_name = "W", default_value = "0.4")]
    pub weight_frequency: f64,

    /// Composite weight of the normalized cost impact
    #[arg(long = "weight-cost", value_name = "W", default_value = "0.4")]
    pub weight_cost: f64,

    /// Composite weight of the outlier confidence
    #[arg(long = "weight-outlier", value_name = "W", default_value = "0.2")]
    pub weight_outlier: f64,

    /// Average days per month used to normalize counts to a monthly rate
    #[arg(long = "avg-days-per-month", value_name = "DAYS", default_value = "30.44")]
    pub avg_days_per_month: f64,

    /// Enable debug logging to stderr
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}

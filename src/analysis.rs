//! Analysis pipeline orchestration
//!
//! One stateless batch transform from an immutable record snapshot to an
//! immutable report: metrics, baselines, outlier flags, consensus, scores,
//! ranks, threshold recommendations. Re-running with the same records and
//! configuration reproduces identical output.

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::baseline::{compute_category_baselines, compute_equipment_metrics, CategoryBaseline};
use crate::config::AnalysisConfig;
use crate::outlier::detect_outliers;
use crate::record::WorkOrderRecord;
use crate::score::{assign_ranks, consensus_outliers, score_equipment, PriorityScore};
use crate::thresholds::{recommend_thresholds, ThresholdRecommendation};

/// Errors for the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("equipment {equipment_id} has no category assigned")]
    MissingCategory { equipment_id: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Equipment excluded from the batch, reported instead of failing the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedEquipment {
    pub equipment_id: String,
    pub reason: String,
}

/// Complete output snapshot of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Every analyzed equipment with its score and whole-population ranks
    /// (audit view)
    pub scores: Vec<PriorityScore>,
    /// Consensus outliers only, re-ranked after filtering (actionable view)
    pub outliers: Vec<PriorityScore>,
    /// Per-category baseline table
    pub baselines: Vec<CategoryBaseline>,
    /// Recommended review thresholds, empty when no consensus outliers exist
    pub recommendations: Vec<ThresholdRecommendation>,
    /// Equipment excluded for structural input violations
    pub skipped: Vec<SkippedEquipment>,
}

/// Run the full analysis over a cleaned record snapshot.
///
/// Structurally invalid records (blank category) are excluded per
/// equipment and reported in `skipped`; the rest of the batch completes.
/// Empty input is a valid, empty report.
pub fn analyze(
    records: &[WorkOrderRecord],
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    config.validate()?;

    let skipped = collect_skipped(records);
    if !skipped.is_empty() {
        tracing::warn!(
            count = skipped.len(),
            "equipment without category excluded from analysis"
        );
    }

    tracing::info!(records = records.len(), "computing equipment metrics");
    let metrics = compute_equipment_metrics(records, config);

    tracing::info!(equipment = metrics.len(), "computing category baselines");
    let baselines = compute_category_baselines(&metrics);

    tracing::info!(categories = baselines.len(), "detecting statistical outliers");
    let flags = detect_outliers(&metrics, &baselines, config);

    tracing::info!("scoring and ranking equipment");
    let mut scores = score_equipment(&metrics, &flags, &baselines, config);
    assign_ranks(&mut scores);

    let outliers = consensus_outliers(&scores);
    tracing::info!(consensus = outliers.len(), "consensus outliers identified");

    let recommendations = recommend_thresholds(&outliers);

    Ok(AnalysisReport {
        scores,
        outliers,
        baselines,
        recommendations,
        skipped,
    })
}

/// Collect equipment excluded for missing categories, one entry per
/// distinct equipment identifier.
fn collect_skipped(records: &[WorkOrderRecord]) -> Vec<SkippedEquipment> {
    let mut seen = BTreeSet::new();
    records
        .iter()
        .filter(|r| !r.has_category())
        .filter(|r| seen.insert(r.equipment_id.clone()))
        .map(|r| SkippedEquipment {
            equipment_id: r.equipment_id.clone(),
            reason: AnalysisError::MissingCategory {
                equipment_id: r.equipment_id.clone(),
            }
            .to_string(),
        })
        .collect()
}

//! Threshold recommendations derived from consensus outliers
//!
//! Turns the flagged population into human-actionable cutoffs: the median
//! frequency and median cost impact among consensus outliers become the
//! recommended review thresholds for future snapshots.

use serde::Serialize;

use crate::baseline::percentile;
use crate::score::PriorityScore;

/// A recommended review threshold for one tracked metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdRecommendation {
    /// Tracked metric name ("frequency" or "cost_impact")
    pub metric: String,
    /// Recommended cutoff, the median of consensus-outlier values
    pub threshold: f64,
    /// Unit of the metric
    pub unit: String,
    /// Number of consensus outliers supporting the recommendation
    pub sample_size: usize,
    /// Stakeholder-facing sentence
    pub rationale: String,
}

/// Derive threshold recommendations from the ranked consensus outliers.
///
/// No consensus outliers is a valid outcome and yields an empty list.
pub fn recommend_thresholds(outliers: &[PriorityScore]) -> Vec<ThresholdRecommendation> {
    if outliers.is_empty() {
        return Vec::new();
    }

    let median_of = |values: &mut Vec<f64>| {
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        percentile(values, 50.0)
    };

    let mut frequencies: Vec<f64> = outliers.iter().map(|s| s.frequency_per_month).collect();
    let mut impacts: Vec<f64> = outliers.iter().map(|s| s.cost_impact).collect();
    let frequency_threshold = median_of(&mut frequencies);
    let cost_threshold = median_of(&mut impacts);

    vec![
        ThresholdRecommendation {
            metric: "frequency".to_string(),
            threshold: frequency_threshold,
            unit: "work orders/month".to_string(),
            sample_size: outliers.len(),
            rationale: format!(
                "Equipment exceeding {:.2} work orders/month in their category warrant review",
                frequency_threshold
            ),
        },
        ThresholdRecommendation {
            metric: "cost_impact".to_string(),
            threshold: cost_threshold,
            unit: "USD".to_string(),
            sample_size: outliers.len(),
            rationale: format!(
                "Equipment exceeding ${:.0} total maintenance spend in their category warrant review",
                cost_threshold
            ),
        },
    ]
}

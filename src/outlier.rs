//! Multi-method outlier detection
//!
//! Three independent statistical tests per equipment (z-score, IQR,
//! percentile), each evaluated against the equipment's own category
//! distribution of monthly repair frequency. No cross-category comparison
//! occurs. Degenerate distributions (std = 0, IQR = 0) never flag.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::baseline::{percentile, CategoryBaseline, EquipmentMetric, MetricStats};
use crate::config::AnalysisConfig;
use crate::consensus;

/// Per-equipment outcome of the three detection methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierFlags {
    pub equipment_id: String,
    /// Frequency exceeds the category mean by more than the z threshold
    pub zscore: bool,
    /// Frequency exceeds the Tukey upper fence (Q3 + k * IQR)
    pub iqr: bool,
    /// Frequency at or above the configured category percentile
    pub percentile: bool,
    /// Number of methods that flagged this equipment (0..=3)
    pub flag_count: u8,
    /// True when at least `min_consensus` methods agree
    pub consensus: bool,
}

/// Z-score test: `(value - mean) / std > threshold`.
///
/// With zero variance nothing is abnormal, so the test never flags.
pub fn zscore_flag(value: f64, stats: &MetricStats, threshold: f64) -> bool {
    if stats.std <= 0.0 || !stats.std.is_finite() {
        return false;
    }
    (value - stats.mean) / stats.std > threshold
}

/// IQR test: `value > Q3 + multiplier * (Q3 - Q1)`.
///
/// `sorted` is the ascending category distribution. Categories smaller
/// than `min_size` produce unstable quartiles and are skipped, as are
/// degenerate distributions where the IQR collapses to zero.
pub fn iqr_flag(value: f64, sorted: &[f64], multiplier: f64, min_size: usize) -> bool {
    if sorted.len() < min_size {
        return false;
    }
    let q1 = percentile(sorted, 25.0);
    let q3 = percentile(sorted, 75.0);
    let iqr = q3 - q1;
    if iqr <= 0.0 || !iqr.is_finite() {
        return false;
    }
    value > q3 + multiplier * iqr
}

/// Percentile test: `value >= pct-th percentile` of the category.
///
/// Shares the minimum-size guard with the IQR test; on tiny categories
/// the top decile covers most of the members.
pub fn percentile_flag(value: f64, sorted: &[f64], pct: f64, min_size: usize) -> bool {
    if sorted.len() < min_size {
        return false;
    }
    // Zero variance means the percentile equals every member value;
    // nothing is abnormal in a flat distribution.
    match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) if last > first => value >= percentile(sorted, pct),
        _ => false,
    }
}

/// Run all three tests for every equipment metric.
///
/// Output is index-aligned with `metrics`. A metric whose category has no
/// baseline (upstream contract violation) is logged and left unflagged.
pub fn detect_outliers(
    metrics: &[EquipmentMetric],
    baselines: &[CategoryBaseline],
    config: &AnalysisConfig,
) -> Vec<OutlierFlags> {
    let stats_by_category: BTreeMap<&str, &CategoryBaseline> = baselines
        .iter()
        .map(|b| (b.category.as_str(), b))
        .collect();

    // Ascending frequency distribution per category, for quartiles and
    // percentile ranks.
    let mut dist_by_category: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for metric in metrics {
        dist_by_category
            .entry(metric.category.as_str())
            .or_default()
            .push(metric.frequency_per_month);
    }
    for dist in dist_by_category.values_mut() {
        dist.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    }

    metrics
        .iter()
        .map(|metric| {
            let baseline = stats_by_category.get(metric.category.as_str());
            let dist = dist_by_category.get(metric.category.as_str());

            let (zscore, iqr, pctl) = match (baseline, dist) {
                (Some(baseline), Some(dist)) => {
                    let value = metric.frequency_per_month;
                    (
                        zscore_flag(value, &baseline.frequency, config.z_threshold),
                        iqr_flag(value, dist, config.iqr_multiplier, config.min_category_size),
                        percentile_flag(value, dist, config.percentile, config.min_category_size),
                    )
                }
                _ => {
                    tracing::warn!(
                        equipment_id = %metric.equipment_id,
                        category = %metric.category,
                        "no baseline for category, skipping outlier tests"
                    );
                    (false, false, false)
                }
            };

            let flag_count = u8::from(zscore) + u8::from(iqr) + u8::from(pctl);
            OutlierFlags {
                equipment_id: metric.equipment_id.clone(),
                zscore,
                iqr,
                percentile: pctl,
                flag_count,
                consensus: consensus::is_consensus(flag_count, config.min_consensus),
            }
        })
        .collect()
}

//! Priority scoring and deterministic ranking
//!
//! Normalizes frequency and cost impact within each category (min-max),
//! combines them with the outlier confidence into a weighted composite
//! score, and assigns category and overall ranks with a deterministic
//! tie-break on equipment identifier.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::baseline::{CategoryBaseline, EquipmentMetric};
use crate::config::AnalysisConfig;
use crate::consensus;
use crate::outlier::OutlierFlags;

/// Composite priority score and ranks for one equipment item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityScore {
    pub equipment_id: String,
    pub category: String,
    pub frequency_per_month: f64,
    pub avg_cost: f64,
    pub cost_impact: f64,
    /// Min-max normalized frequency within the category, in [0, 1]
    pub norm_frequency: f64,
    /// Min-max normalized cost impact within the category, in [0, 1]
    pub norm_cost: f64,
    /// Outlier confidence: 0.0, 0.5 or 1.0
    pub confidence: f64,
    /// Weighted composite score, in [0, 1]
    pub composite: f64,
    /// Rank within the category, 1 = highest composite
    pub category_rank: u32,
    /// Rank across the whole dataset, 1 = highest composite
    pub overall_rank: u32,
    /// True when at least the configured number of methods agreed
    pub consensus: bool,
}

/// Min-max scale a value into [0, 1].
///
/// When all category members are equal the denominator is zero; the
/// normalized value is defined as 0.0 (no variance, no signal).
fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        return 0.0;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

/// Compute composite priority scores for every equipment metric.
///
/// `flags` must be index-aligned with `metrics` (as produced by
/// `outlier::detect_outliers`). Ranks are left at zero; call
/// `assign_ranks` on the result.
pub fn score_equipment(
    metrics: &[EquipmentMetric],
    flags: &[OutlierFlags],
    baselines: &[CategoryBaseline],
    config: &AnalysisConfig,
) -> Vec<PriorityScore> {
    let by_category: BTreeMap<&str, &CategoryBaseline> = baselines
        .iter()
        .map(|b| (b.category.as_str(), b))
        .collect();

    metrics
        .iter()
        .zip(flags)
        .map(|(metric, flag)| {
            let (norm_frequency, norm_cost) = match by_category.get(metric.category.as_str()) {
                Some(baseline) => (
                    normalize(
                        metric.frequency_per_month,
                        baseline.frequency.min,
                        baseline.frequency.max,
                    ),
                    normalize(
                        metric.cost_impact,
                        baseline.cost_impact.min,
                        baseline.cost_impact.max,
                    ),
                ),
                None => (0.0, 0.0),
            };

            let confidence = consensus::confidence(flag.flag_count, config.min_consensus);

            let w = &config.weights;
            let composite =
                w.frequency * norm_frequency + w.cost * norm_cost + w.outlier * confidence;
            // Numeric edge cases are resolved before this point; a NaN here
            // would poison every rank downstream.
            let composite = if composite.is_finite() { composite } else { 0.0 };

            PriorityScore {
                equipment_id: metric.equipment_id.clone(),
                category: metric.category.clone(),
                frequency_per_month: metric.frequency_per_month,
                avg_cost: metric.avg_cost,
                cost_impact: metric.cost_impact,
                norm_frequency,
                norm_cost,
                confidence,
                composite,
                category_rank: 0,
                overall_rank: 0,
                consensus: flag.consensus,
            }
        })
        .collect()
}

/// Sort descending by composite score and assign ranks in place.
///
/// Ties break on ascending equipment identifier so repeated runs produce
/// identical rank order.
pub fn assign_ranks(scores: &mut [PriorityScore]) {
    scores.sort_by(|a, b| {
        b.composite
            .partial_cmp(&a.composite)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.equipment_id.cmp(&b.equipment_id))
    });

    let mut per_category: HashMap<String, u32> = HashMap::new();
    for (i, score) in scores.iter_mut().enumerate() {
        score.overall_rank = (i + 1) as u32;
        let rank = per_category.entry(score.category.clone()).or_insert(0);
        *rank += 1;
        score.category_rank = *rank;
    }
}

/// Extract the stakeholder-facing list: consensus outliers only,
/// re-ranked after filtering.
///
/// Non-consensus equipment keep their scores in the full list for audit.
pub fn consensus_outliers(scores: &[PriorityScore]) -> Vec<PriorityScore> {
    let mut outliers: Vec<PriorityScore> =
        scores.iter().filter(|s| s.consensus).cloned().collect();
    assign_ranks(&mut outliers);
    outliers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(id: &str, category: &str, freq: f64, avg_cost: f64, count: u32) -> EquipmentMetric {
        EquipmentMetric {
            equipment_id: id.to_string(),
            category: category.to_string(),
            work_orders: count,
            timespan_days: 30,
            frequency_per_month: freq,
            avg_cost,
            cost_impact: f64::from(count) * avg_cost,
            avg_completion_days: None,
        }
    }

    fn flags(id: &str, count: u8) -> OutlierFlags {
        OutlierFlags {
            equipment_id: id.to_string(),
            zscore: count >= 1,
            iqr: count >= 2,
            percentile: count >= 3,
            flag_count: count,
            consensus: count >= 2,
        }
    }

    fn baseline_for(metrics: &[EquipmentMetric]) -> Vec<CategoryBaseline> {
        crate::baseline::compute_category_baselines(metrics)
    }

    #[test]
    fn test_normalize_min_max() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(0.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(10.0, 0.0, 10.0), 1.0);
    }

    #[test]
    fn test_normalize_zero_span_defaults_to_zero() {
        assert_eq!(normalize(7.0, 7.0, 7.0), 0.0);
    }

    #[test]
    fn test_composite_stays_in_unit_interval() {
        let metrics = vec![
            metric("A", "HVAC", 1.0, 100.0, 2),
            metric("B", "HVAC", 5.0, 400.0, 8),
            metric("C", "HVAC", 10.0, 900.0, 20),
        ];
        let all_flags = vec![flags("A", 0), flags("B", 1), flags("C", 3)];
        let baselines = baseline_for(&metrics);
        let scores = score_equipment(&metrics, &all_flags, &baselines, &AnalysisConfig::default());

        for s in &scores {
            assert!(s.composite >= 0.0 && s.composite <= 1.0, "{:?}", s);
            assert!(s.norm_frequency >= 0.0 && s.norm_frequency <= 1.0);
            assert!(s.norm_cost >= 0.0 && s.norm_cost <= 1.0);
        }

        // The max-everything equipment with full confidence scores exactly 1.0
        let top = scores.iter().find(|s| s.equipment_id == "C").unwrap();
        assert!((top.composite - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_formula() {
        let metrics = vec![
            metric("A", "HVAC", 0.0, 0.0, 0),
            metric("B", "HVAC", 10.0, 50.0, 10),
            metric("C", "HVAC", 5.0, 25.0, 5),
        ];
        // C: norm_freq = 0.5, norm_cost = 125/500 = 0.25, one flag -> 0.5
        let all_flags = vec![flags("A", 0), flags("B", 0), flags("C", 1)];
        let baselines = baseline_for(&metrics);
        let scores = score_equipment(&metrics, &all_flags, &baselines, &AnalysisConfig::default());

        let c = scores.iter().find(|s| s.equipment_id == "C").unwrap();
        let expected = 0.4 * 0.5 + 0.4 * 0.25 + 0.2 * 0.5;
        assert!((c.composite - expected).abs() < 1e-12);
    }

    #[test]
    fn test_single_member_category_normalizes_to_zero() {
        let metrics = vec![metric("A", "Elevator", 4.0, 300.0, 6)];
        let all_flags = vec![flags("A", 0)];
        let baselines = baseline_for(&metrics);
        let scores = score_equipment(&metrics, &all_flags, &baselines, &AnalysisConfig::default());

        assert_eq!(scores[0].norm_frequency, 0.0);
        assert_eq!(scores[0].norm_cost, 0.0);
        assert_eq!(scores[0].composite, 0.0);
    }

    #[test]
    fn test_assign_ranks_orders_by_composite_descending() {
        let metrics = vec![
            metric("A", "HVAC", 1.0, 10.0, 1),
            metric("B", "HVAC", 9.0, 90.0, 9),
            metric("C", "Plumbing", 3.0, 30.0, 3),
            metric("D", "Plumbing", 6.0, 60.0, 6),
        ];
        let all_flags: Vec<OutlierFlags> = ["A", "B", "C", "D"]
            .iter()
            .map(|id| flags(id, 0))
            .collect();
        let baselines = baseline_for(&metrics);
        let mut scores =
            score_equipment(&metrics, &all_flags, &baselines, &AnalysisConfig::default());
        assign_ranks(&mut scores);

        assert_eq!(scores[0].overall_rank, 1);
        assert_eq!(scores.last().unwrap().overall_rank, 4);
        for window in scores.windows(2) {
            assert!(window[0].composite >= window[1].composite);
        }
        // Category ranks count within each category only
        for category in ["HVAC", "Plumbing"] {
            let ranks: Vec<u32> = scores
                .iter()
                .filter(|s| s.category == category)
                .map(|s| s.category_rank)
                .collect();
            let mut sorted = ranks.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![1, 2]);
        }
    }

    #[test]
    fn test_ties_break_on_ascending_equipment_id() {
        let metrics = vec![
            metric("ZZ-9", "HVAC", 5.0, 5.0, 5),
            metric("AA-1", "HVAC", 5.0, 5.0, 5),
            metric("MM-5", "HVAC", 5.0, 5.0, 5),
        ];
        let all_flags: Vec<OutlierFlags> = ["ZZ-9", "AA-1", "MM-5"]
            .iter()
            .map(|id| flags(id, 0))
            .collect();
        let baselines = baseline_for(&metrics);
        let mut scores =
            score_equipment(&metrics, &all_flags, &baselines, &AnalysisConfig::default());
        assign_ranks(&mut scores);

        let ids: Vec<&str> = scores.iter().map(|s| s.equipment_id.as_str()).collect();
        assert_eq!(ids, vec!["AA-1", "MM-5", "ZZ-9"]);
    }

    #[test]
    fn test_consensus_outliers_filters_and_reranks() {
        let metrics = vec![
            metric("A", "HVAC", 1.0, 10.0, 1),
            metric("B", "HVAC", 9.0, 90.0, 9),
            metric("C", "HVAC", 7.0, 70.0, 7),
        ];
        let all_flags = vec![flags("A", 0), flags("B", 3), flags("C", 2)];
        let baselines = baseline_for(&metrics);
        let mut scores =
            score_equipment(&metrics, &all_flags, &baselines, &AnalysisConfig::default());
        assign_ranks(&mut scores);

        let outliers = consensus_outliers(&scores);
        assert_eq!(outliers.len(), 2);
        assert!(outliers.iter().all(|s| s.consensus));
        assert_eq!(outliers[0].overall_rank, 1);
        assert_eq!(outliers[1].overall_rank, 2);
        assert_eq!(outliers[0].equipment_id, "B");
    }
}

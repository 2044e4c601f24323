//! Baseline builder: per-equipment metrics and per-category statistics
//!
//! First stage of the pipeline. Groups cleaned work orders by equipment,
//! derives frequency and cost metrics, then aggregates those metrics into
//! per-category baselines. Categories never compare against each other;
//! every statistic is scoped to its own category.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::record::WorkOrderRecord;

/// Frequency and cost metrics for one equipment item.
///
/// Created once per run by the baseline builder, never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentMetric {
    pub equipment_id: String,
    pub category: String,
    /// Number of work orders observed for this equipment
    pub work_orders: u32,
    /// Days between first and last work order, both endpoints included,
    /// never below 1
    pub timespan_days: i64,
    /// Work orders per month, normalized with the configured days/month
    pub frequency_per_month: f64,
    /// Mean of strictly positive costs, 0.0 when no usable cost exists
    pub avg_cost: f64,
    /// Total estimated maintenance spend: work_orders * avg_cost
    pub cost_impact: f64,
    /// Mean days from creation to completion, over records that have both
    /// dates
    pub avg_completion_days: Option<f64>,
}

/// Mean/median/std/min/max of one metric across a category's members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricStats {
    /// Compute the stats over a set of values.
    ///
    /// Empty input yields all-zero stats. Standard deviation uses the
    /// sample convention (n - 1) and is defined as 0.0 for a single value.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                median: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        let std = if values.len() < 2 {
            0.0
        } else {
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            if variance.is_finite() && variance > 0.0 {
                variance.sqrt()
            } else {
                0.0
            }
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = percentile(&sorted, 50.0);
        let min = sorted.first().copied().unwrap_or(0.0);
        let max = sorted.last().copied().unwrap_or(0.0);

        Self {
            mean,
            median,
            std,
            min,
            max,
        }
    }
}

/// Baseline statistics for one equipment category.
///
/// Derived solely from that category's equipment metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBaseline {
    pub category: String,
    /// Number of member equipment items
    pub equipment_count: usize,
    /// Total work orders across members
    pub total_work_orders: u64,
    /// Stats over members' frequency_per_month
    pub frequency: MetricStats,
    /// Stats over members' cost_impact
    pub cost_impact: MetricStats,
}

/// Compute per-equipment metrics from cleaned work orders.
///
/// Records with a blank category are ignored here; the pipeline reports
/// them separately through the skipped list. Grouping is by
/// (equipment_id, category) in sorted order so output is deterministic.
pub fn compute_equipment_metrics(
    records: &[WorkOrderRecord],
    config: &AnalysisConfig,
) -> Vec<EquipmentMetric> {
    let mut groups: BTreeMap<(&str, &str), Vec<&WorkOrderRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.has_category()) {
        groups
            .entry((record.equipment_id.as_str(), record.category.as_str()))
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|((equipment_id, category), group)| {
            let work_orders = group.len() as u32;

            // Timespan covers both endpoint dates; a single work order
            // yields 1 day, which also avoids division by zero.
            let first = group.iter().map(|r| r.create_date).min();
            let last = group.iter().map(|r| r.create_date).max();
            let timespan_days = match (first, last) {
                (Some(first), Some(last)) => ((last - first).num_days() + 1).max(1),
                _ => 1,
            };

            let frequency_per_month =
                work_orders as f64 / timespan_days as f64 * config.avg_days_per_month;

            // Zero and negative amounts carry no cost information.
            let positive_costs: Vec<f64> = group
                .iter()
                .filter_map(|r| r.cost)
                .filter(|c| *c > 0.0)
                .collect();
            let avg_cost = if positive_costs.is_empty() {
                0.0
            } else {
                positive_costs.iter().sum::<f64>() / positive_costs.len() as f64
            };
            let cost_impact = f64::from(work_orders) * avg_cost;

            let completion_days: Vec<f64> = group
                .iter()
                .filter_map(|r| {
                    r.complete_date
                        .map(|done| (done - r.create_date).num_days() as f64)
                })
                .collect();
            let avg_completion_days = if completion_days.is_empty() {
                None
            } else {
                Some(completion_days.iter().sum::<f64>() / completion_days.len() as f64)
            };

            EquipmentMetric {
                equipment_id: equipment_id.to_string(),
                category: category.to_string(),
                work_orders,
                timespan_days,
                frequency_per_month,
                avg_cost,
                cost_impact,
                avg_completion_days,
            }
        })
        .collect()
}

/// Aggregate equipment metrics into per-category baselines.
///
/// Pure function; empty input yields empty output, not an error.
pub fn compute_category_baselines(metrics: &[EquipmentMetric]) -> Vec<CategoryBaseline> {
    let mut by_category: BTreeMap<&str, Vec<&EquipmentMetric>> = BTreeMap::new();
    for metric in metrics {
        by_category
            .entry(metric.category.as_str())
            .or_default()
            .push(metric);
    }

    by_category
        .into_iter()
        .map(|(category, members)| {
            let frequencies: Vec<f64> = members.iter().map(|m| m.frequency_per_month).collect();
            let impacts: Vec<f64> = members.iter().map(|m| m.cost_impact).collect();
            let total_work_orders = members.iter().map(|m| u64::from(m.work_orders)).sum();

            CategoryBaseline {
                category: category.to_string(),
                equipment_count: members.len(),
                total_work_orders,
                frequency: MetricStats::from_values(&frequencies),
                cost_impact: MetricStats::from_values(&impacts),
            }
        })
        .collect()
}

/// Calculate a percentile over sorted data using linear interpolation.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if upper >= sorted.len() {
        sorted[sorted.len() - 1]
    } else if lower == upper {
        sorted[lower]
    } else {
        let weight = rank - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

//! Text rendering of the analysis report
//!
//! Aligned-column summary for stakeholders: dataset totals, the top
//! consensus outliers, recommended thresholds, and any skipped equipment.
//! Machine consumers use `--format json` instead.

use std::fmt::Write;

use crate::analysis::AnalysisReport;
use crate::score::PriorityScore;

/// Render the stakeholder summary.
///
/// `top` limits the ranked table; `show_all` switches the table from the
/// consensus-only actionable list to the full audit list.
pub fn render_summary(report: &AnalysisReport, top: usize, show_all: bool) -> String {
    let mut out = String::new();

    let total_equipment = report.scores.len();
    let (total_work_orders, total_cost_impact) = dataset_totals(report);

    let _ = writeln!(out, "=== Equipment Cost Reduction Analysis ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "Equipment analyzed:   {}", total_equipment);
    let _ = writeln!(out, "Categories:           {}", report.baselines.len());
    let _ = writeln!(out, "Work orders:          {}", total_work_orders);
    let _ = writeln!(out, "Total cost impact:    ${:.0}", total_cost_impact);
    let _ = writeln!(out, "Consensus outliers:   {}", report.outliers.len());

    let (title, rows): (&str, &[PriorityScore]) = if show_all {
        ("All Equipment by Priority", &report.scores)
    } else {
        ("Top Priority Equipment (consensus outliers)", &report.outliers)
    };

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    if rows.is_empty() {
        let _ = writeln!(out, "  none - all equipment within normal ranges");
    } else {
        let _ = writeln!(
            out,
            "{:>5} {:<16} {:<20} {:>9} {:>12} {:>9} {:>10}",
            "rank", "equipment", "category", "wo/month", "cost impact", "priority", "consensus"
        );
        let _ = writeln!(out, "{}", "-".repeat(88));
        for score in rows.iter().take(top) {
            let _ = writeln!(
                out,
                "{:>5} {:<16} {:<20} {:>9.2} {:>12.0} {:>9.3} {:>10}",
                score.overall_rank,
                truncate(&score.equipment_id, 16),
                truncate(&score.category, 20),
                score.frequency_per_month,
                score.cost_impact,
                score.composite,
                if score.consensus { "yes" } else { "" }
            );
        }
        if rows.len() > top {
            let _ = writeln!(out, "  ... and {} more", rows.len() - top);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Recommended Thresholds");
    if report.recommendations.is_empty() {
        let _ = writeln!(
            out,
            "  none - no consensus outliers to support a recommendation"
        );
    } else {
        for rec in &report.recommendations {
            let _ = writeln!(out, "  {}", rec.rationale);
        }
    }

    if !report.skipped.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Skipped equipment ({} structural input violations):",
            report.skipped.len()
        );
        for skip in &report.skipped {
            let _ = writeln!(out, "  {}: {}", skip.equipment_id, skip.reason);
        }
    }

    out
}

/// Render the per-category baseline table.
pub fn render_baselines(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Category Baselines (work orders/month)");
    let _ = writeln!(
        out,
        "{:<20} {:>6} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "category", "equip", "wo", "mean", "median", "std", "min", "max"
    );
    let _ = writeln!(out, "{}", "-".repeat(80));
    for b in &report.baselines {
        let _ = writeln!(
            out,
            "{:<20} {:>6} {:>8} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
            truncate(&b.category, 20),
            b.equipment_count,
            b.total_work_orders,
            b.frequency.mean,
            b.frequency.median,
            b.frequency.std,
            b.frequency.min,
            b.frequency.max
        );
    }
    out
}

/// Dataset totals for the headline block.
///
/// Cost impacts are dollar amounts and stay in f64 so large totals render
/// exactly.
fn dataset_totals(report: &AnalysisReport) -> (u64, f64) {
    let total_work_orders = report.baselines.iter().map(|b| b.total_work_orders).sum();
    let total_cost_impact = report.scores.iter().map(|s| s.cost_impact).sum();
    (total_work_orders, total_cost_impact)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max.saturating_sub(1)).collect::<String>() + "…"
    }
}

//! Cleaned work-order input records
//!
//! Records arrive from the upstream ingestion/cleaning/categorization
//! pipeline already typed and category-assigned. This module is the
//! ingestion boundary: field shape is validated once by serde, never
//! re-validated downstream.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cleaned, categorized work order.
///
/// Immutable input to the analysis core. Ownership stays with the caller;
/// every computation consumes records read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderRecord {
    /// Equipment identifier (e.g., "AHU-012")
    pub equipment_id: String,
    /// Primary equipment category assigned upstream (e.g., "HVAC")
    pub category: String,
    /// Work-order creation date
    pub create_date: NaiveDate,
    /// Completion date, when the work order was closed
    #[serde(default)]
    pub complete_date: Option<NaiveDate>,
    /// Purchase-order amount in dollars (zero or absent means unknown)
    #[serde(default)]
    pub cost: Option<f64>,
}

impl WorkOrderRecord {
    /// Whether the record carries a usable category label.
    ///
    /// Blank categories violate the upstream contract; affected equipment
    /// is reported through the skipped list rather than failing the batch.
    pub fn has_category(&self) -> bool {
        !self.category.trim().is_empty()
    }
}

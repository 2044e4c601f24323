//! Analysis configuration
//!
//! Every threshold, weight, and constant the pipeline uses lives in one
//! immutable value passed explicitly into each computation. Nothing reads
//! ambient global state, so two runs with the same records and the same
//! config produce identical output.

use serde::Serialize;

use crate::analysis::AnalysisError;

/// Average days per month used to normalize work-order counts to a
/// monthly rate.
pub const AVG_DAYS_PER_MONTH: f64 = 30.44;

/// Weights for the composite priority score.
///
/// Must be non-negative and sum to 1.0 so the composite stays in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    /// Weight of the normalized repair frequency
    pub frequency: f64,
    /// Weight of the normalized cost impact
    pub cost: f64,
    /// Weight of the outlier confidence
    pub outlier: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            frequency: 0.4,
            cost: 0.4,
            outlier: 0.2,
        }
    }
}

/// Tunable parameters for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// Standard deviations above the category mean for the z-score test
    pub z_threshold: f64,
    /// Multiplier on the interquartile range for the Tukey upper fence
    pub iqr_multiplier: f64,
    /// Percentile cutoff for the percentile test (90 flags the top 10%)
    pub percentile: f64,
    /// Methods that must agree before an equipment counts as a consensus
    /// outlier
    pub min_consensus: u8,
    /// Categories with fewer members than this skip the IQR and percentile
    /// tests (quartiles are unstable on tiny distributions)
    pub min_category_size: usize,
    /// Composite score weights
    pub weights: ScoreWeights,
    /// Days-per-month constant for monthly frequency normalization
    pub avg_days_per_month: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            z_threshold: 2.0,
            iqr_multiplier: 1.5,
            percentile: 90.0,
            min_consensus: 2,
            min_category_size: 3,
            weights: ScoreWeights::default(),
            avg_days_per_month: AVG_DAYS_PER_MONTH,
        }
    }
}

impl AnalysisConfig {
    /// Validate the configuration before a run.
    ///
    /// Rejects values that would make the statistics meaningless or push a
    /// composite score outside [0, 1].
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.z_threshold <= 0.0 || !self.z_threshold.is_finite() {
            return Err(AnalysisError::InvalidConfig(format!(
                "z-score threshold must be positive, got {}",
                self.z_threshold
            )));
        }
        if self.iqr_multiplier < 0.0 || !self.iqr_multiplier.is_finite() {
            return Err(AnalysisError::InvalidConfig(format!(
                "IQR multiplier must be non-negative, got {}",
                self.iqr_multiplier
            )));
        }
        if !(self.percentile > 0.0 && self.percentile < 100.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "percentile must be in (0, 100), got {}",
                self.percentile
            )));
        }
        if self.min_consensus == 0 || self.min_consensus > 3 {
            return Err(AnalysisError::InvalidConfig(format!(
                "minimum agreeing methods must be 1..=3, got {}",
                self.min_consensus
            )));
        }
        if self.min_category_size < 2 {
            return Err(AnalysisError::InvalidConfig(format!(
                "minimum category size must be at least 2, got {}",
                self.min_category_size
            )));
        }
        if self.avg_days_per_month <= 0.0 || !self.avg_days_per_month.is_finite() {
            return Err(AnalysisError::InvalidConfig(format!(
                "days per month must be positive, got {}",
                self.avg_days_per_month
            )));
        }

        let w = &self.weights;
        let sum = w.frequency + w.cost + w.outlier;
        if w.frequency < 0.0 || w.cost < 0.0 || w.outlier < 0.0 || (sum - 1.0).abs() > 1e-6 {
            return Err(AnalysisError::InvalidConfig(format!(
                "score weights must be non-negative and sum to 1.0, got {}/{}/{}",
                w.frequency, w.cost, w.outlier
            )));
        }

        Ok(())
    }
}

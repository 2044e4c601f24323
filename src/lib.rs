//! Repara - statistical work-order analysis for maintenance equipment
//!
//! This library ranks maintenance equipment by cost-reduction opportunity
//! from historical work-order records: per-category frequency and cost
//! baselines, multi-method outlier detection (z-score, IQR, percentile)
//! with consensus voting, weighted composite priority scoring, and
//! actionable threshold recommendations.
//!
//! The whole core is a stateless, deterministic batch transform from one
//! immutable record snapshot to one report snapshot.

pub mod analysis;
pub mod baseline;
pub mod cli;
pub mod config;
pub mod consensus;
pub mod outlier;
pub mod record;
pub mod report;
pub mod score;
pub mod thresholds;

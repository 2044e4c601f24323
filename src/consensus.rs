//! Consensus voting over the three outlier detection methods
//!
//! Deterministic majority vote: an equipment is a consensus outlier when at
//! least `min_consensus` methods agree. Confidence maps the vote onto the
//! fixed {0.0, 0.5, 1.0} scale consumed by the priority scorer.

/// True when at least `min_consensus` of the three methods flagged.
pub fn is_consensus(flag_count: u8, min_consensus: u8) -> bool {
    flag_count >= min_consensus
}

/// Map a flag count to outlier confidence.
///
/// 1.0 for consensus, 0.5 when flagged by at least one method but below
/// consensus, 0.0 when no method flagged.
pub fn confidence(flag_count: u8, min_consensus: u8) -> f64 {
    if flag_count >= min_consensus {
        1.0
    } else if flag_count > 0 {
        0.5
    } else {
        0.0
    }
}

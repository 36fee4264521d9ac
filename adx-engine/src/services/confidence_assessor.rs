//! Consensus confidence scoring for the aggregation path
//!
//! Rates how strongly the top-ranked keyword dominates the full weighted
//! mention pool. The 1.2 multiplier compensates for dilution across many
//! distinct keywords; the ceiling keeps residual uncertainty in every
//! result. This scorer is independent of `AiConfidenceScorer` and the two
//! are never combined.

use tracing::debug;

/// Consensus confidence assessor
pub struct ConsensusConfidence {
    /// Upper bound on any reported confidence
    ceiling: f64,
    /// Multiplier applied to the dominance ratio
    dominance_multiplier: f64,
}

impl ConsensusConfidence {
    /// Create an assessor with the standard ceiling (0.95) and multiplier (1.2)
    pub fn new() -> Self {
        Self {
            ceiling: 0.95,
            dominance_multiplier: 1.2,
        }
    }

    /// Confidence for a top keyword over the total weighted mention pool
    ///
    /// `min(ceiling, top / total × multiplier)`, rounded to two decimal
    /// places. A zero total yields 0.0 (the tally was empty, which callers
    /// resolve to the insufficient-data sentinel before scoring).
    pub fn assess(&self, top_count: u32, total_mentions: u32) -> f64 {
        if total_mentions == 0 {
            return 0.0;
        }

        let dominance = f64::from(top_count) / f64::from(total_mentions);
        let confidence = (dominance * self.dominance_multiplier).min(self.ceiling);
        let rounded = (confidence * 100.0).round() / 100.0;

        debug!(
            top_count = top_count,
            total_mentions = total_mentions,
            confidence = rounded,
            "Assessed consensus confidence"
        );

        rounded
    }
}

impl Default for ConsensusConfidence {
    fn default() -> Self {
        Self::new()
    }
}

//! End-to-end diagnosis pipeline
//!
//! Chains the pipeline stages into a single synchronous call:
//! weighted aggregation → top-5 ranking → vehicle plausibility filtering →
//! consensus confidence → sentence composition. Every invocation is a pure
//! function of its inputs; no state survives between calls.

use crate::services::confidence_assessor::ConsensusConfidence;
use crate::services::diagnosis_composer::DiagnosisComposer;
use crate::services::source_aggregator::SourceAggregator;
use crate::services::vehicle_checker::VehicleSpecChecker;
use crate::types::{DiagnosisResult, EvidenceCorpus, VehicleProfile};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Diagnosis reported when no keyword matched anywhere
pub const INSUFFICIENT_DATA_DIAGNOSIS: &str = "Unable to determine issue - insufficient data";

/// Confidence attached to the insufficient-data sentinel
pub const INSUFFICIENT_DATA_CONFIDENCE: f64 = 0.3;

/// How many ranked keywords survive into filtering and composition
const TOP_CANDIDATES: usize = 5;

/// Diagnosis aggregation engine
pub struct DiagnosisEngine {
    aggregator: SourceAggregator,
    checker: VehicleSpecChecker,
    confidence: ConsensusConfidence,
    composer: DiagnosisComposer,
}

impl DiagnosisEngine {
    /// Create an engine with the compiled-in vocabulary and tables
    pub fn new() -> Self {
        Self {
            aggregator: SourceAggregator::new(),
            checker: VehicleSpecChecker::new(),
            confidence: ConsensusConfidence::new(),
            composer: DiagnosisComposer::new(),
        }
    }

    /// Create an engine from preconfigured stage services
    pub fn with_services(
        aggregator: SourceAggregator,
        checker: VehicleSpecChecker,
        confidence: ConsensusConfidence,
        composer: DiagnosisComposer,
    ) -> Self {
        Self {
            aggregator,
            checker,
            confidence,
            composer,
        }
    }

    /// Diagnose a noise complaint from a materialized evidence corpus
    ///
    /// Absent collections and absent vehicle profile are valid states;
    /// without a profile, plausibility filtering is skipped.
    pub fn diagnose(
        &self,
        corpus: &EvidenceCorpus,
        vehicle: Option<&VehicleProfile>,
    ) -> DiagnosisResult {
        let evidence = self.aggregator.aggregate(corpus);

        if evidence.tally.is_empty() {
            warn!("No diagnostic keywords found from any source");
            return Self::insufficient_data(evidence.sources);
        }

        // Confidence divides by the full mention pool, not just the top 5
        let total_mentions = evidence.tally.total();

        let mut candidates = evidence.tally.top(TOP_CANDIDATES);
        debug!(candidates = ?candidates, "Most common keywords");

        if let Some(profile) = vehicle {
            candidates = self.checker.filter_candidates(&candidates, profile);
            debug!(candidates = ?candidates, "Plausibility-filtered keywords");
        }

        let top_count = candidates.first().map(|(_, count)| *count).unwrap_or(0);
        let confidence = self.confidence.assess(top_count, total_mentions);

        let diagnosis = self
            .composer
            .compose(&candidates)
            .unwrap_or_else(|| INSUFFICIENT_DATA_DIAGNOSIS.to_string());

        info!(
            diagnosis = %diagnosis,
            confidence = confidence,
            "Consensus diagnosis"
        );

        let keywords: Vec<String> = candidates.iter().map(|(k, _)| k.clone()).collect();
        let keyword_counts: HashMap<String, u32> = candidates.into_iter().collect();

        DiagnosisResult {
            diagnosis,
            confidence,
            sources: evidence.sources,
            keywords,
            keyword_counts,
        }
    }

    /// The fixed sentinel for a corpus with no keyword match anywhere
    fn insufficient_data(sources: Vec<String>) -> DiagnosisResult {
        DiagnosisResult {
            diagnosis: INSUFFICIENT_DATA_DIAGNOSIS.to_string(),
            confidence: INSUFFICIENT_DATA_CONFIDENCE,
            sources,
            keywords: Vec::new(),
            keyword_counts: HashMap::new(),
        }
    }
}

impl Default for DiagnosisEngine {
    fn default() -> Self {
        Self::new()
    }
}

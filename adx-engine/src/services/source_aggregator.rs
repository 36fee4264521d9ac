//! Source-weighted frequency aggregation
//!
//! Folds every evidence text through the keyword extractor into one
//! weighted tally. Scraped text counts single; the spectrogram match and
//! the language-model opinion count double. Collections are always
//! processed in a fixed order (titles, descriptions, comments, transcripts,
//! spectrogram match, AI diagnosis) so that equal-count keywords rank
//! deterministically no matter how the acquisition layer's worker pool
//! ordered its results.
//!
//! Titles, descriptions, the spectrogram match, and the AI diagnosis also
//! contribute a normalized sentence candidate; comments and transcripts
//! contribute keywords only. One audit entry is recorded per non-empty
//! collection.

use crate::services::keyword_extractor::KeywordExtractor;
use crate::types::{EvidenceCorpus, KeywordTally, SourceKind};
use tracing::debug;

/// Output of one aggregation pass
#[derive(Debug, Clone, Default)]
pub struct AggregatedEvidence {
    /// Weighted keyword tally across all sources
    pub tally: KeywordTally,
    /// Audit entries, one per non-empty collection, in processing order
    pub sources: Vec<String>,
    /// Normalized raw-diagnosis-sentence candidates
    pub sentence_candidates: Vec<String>,
}

/// Weighted multi-source aggregator
pub struct SourceAggregator {
    extractor: KeywordExtractor,
}

impl SourceAggregator {
    /// Create an aggregator with the compiled-in vocabulary
    pub fn new() -> Self {
        Self {
            extractor: KeywordExtractor::new(),
        }
    }

    /// Create an aggregator with a custom extractor
    pub fn with_extractor(extractor: KeywordExtractor) -> Self {
        Self { extractor }
    }

    /// Aggregate one evidence corpus into a weighted tally
    ///
    /// Absent or empty collections are skipped entirely (no audit entry);
    /// they are a valid "source not available" state, not an error.
    pub fn aggregate(&self, corpus: &EvidenceCorpus) -> AggregatedEvidence {
        let mut evidence = AggregatedEvidence::default();

        self.fold_collection(SourceKind::Title, &corpus.titles, &mut evidence);
        self.fold_collection(SourceKind::Description, &corpus.descriptions, &mut evidence);
        self.fold_collection(SourceKind::Comment, &corpus.comments, &mut evidence);
        self.fold_collection(SourceKind::Transcript, &corpus.transcripts, &mut evidence);
        self.fold_single(SourceKind::SpectrogramMatch, corpus.spectrogram_match.as_deref(), &mut evidence);
        self.fold_single(SourceKind::AiDiagnosis, corpus.ai_diagnosis.as_deref(), &mut evidence);

        debug!(
            distinct_keywords = evidence.tally.len(),
            total_mentions = evidence.tally.total(),
            sources = evidence.sources.len(),
            "Aggregated evidence corpus"
        );

        evidence
    }

    /// Fold one multi-item collection into the running evidence
    fn fold_collection(&self, kind: SourceKind, texts: &[String], evidence: &mut AggregatedEvidence) {
        if texts.is_empty() {
            return;
        }

        for text in texts {
            self.fold_text(kind, text, evidence);
        }

        evidence.sources.push(kind.audit_label(texts.len()));
        debug!(count = texts.len(), kind = ?kind, "Processed source collection");
    }

    /// Fold an optional single-item source into the running evidence
    ///
    /// An empty string counts as absent, same as `None`.
    fn fold_single(&self, kind: SourceKind, text: Option<&str>, evidence: &mut AggregatedEvidence) {
        let text = match text {
            Some(t) if !t.is_empty() => t,
            _ => return,
        };

        self.fold_text(kind, text, evidence);
        evidence.sources.push(kind.audit_label(1));
        debug!(kind = ?kind, "Processed high-trust source");
    }

    /// Tally one text's keyword hits and record its sentence candidate
    fn fold_text(&self, kind: SourceKind, text: &str, evidence: &mut AggregatedEvidence) {
        let weight = kind.weight();
        for hit in self.extractor.extract(text) {
            evidence.tally.add(&hit, weight);
        }

        if kind.contributes_sentence() {
            let normalized = normalize_sentence(text);
            if !normalized.is_empty() {
                evidence.sentence_candidates.push(normalized);
            }
        }
    }
}

impl Default for SourceAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a diagnosis sentence for comparison: lower-case and collapse
/// all whitespace runs to single spaces
pub fn normalize_sentence(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

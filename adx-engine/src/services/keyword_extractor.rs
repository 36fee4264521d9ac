//! Keyword extraction from free-text evidence
//!
//! Scans a text for members of the closed diagnostic vocabulary. Matching
//! is case-insensitive substring containment, reported in vocabulary scan
//! order rather than text position. Overlapping terms ("pad" and "pads"
//! both matching "brake pads worn") are all reported; no dedup happens
//! within one extraction — the weighted tally downstream absorbs the
//! redundancy.

use crate::vocabulary::DiagnosticVocabulary;
use tracing::trace;

/// Keyword extractor over a fixed vocabulary
pub struct KeywordExtractor {
    vocabulary: DiagnosticVocabulary,
}

impl KeywordExtractor {
    /// Create an extractor with the compiled-in vocabulary
    pub fn new() -> Self {
        Self {
            vocabulary: DiagnosticVocabulary::default(),
        }
    }

    /// Create an extractor with a replacement vocabulary
    pub fn with_vocabulary(vocabulary: DiagnosticVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Extract matching vocabulary terms from `text`
    ///
    /// Empty text yields an empty list, never an error.
    pub fn extract(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let text_lower = text.to_lowercase();

        let found: Vec<String> = self
            .vocabulary
            .terms()
            .iter()
            .filter(|term| text_lower.contains(term.as_str()))
            .cloned()
            .collect();

        trace!(matches = found.len(), "Extracted keywords");

        found
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

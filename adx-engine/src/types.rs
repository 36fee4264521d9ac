//! Core types for the diagnosis aggregation pipeline
//!
//! Shared data model across the engine services:
//! - Evidence input types (`SourceKind`, `TextSource`, `EvidenceCorpus`)
//! - Vehicle identity (`VehicleProfile`)
//! - Weighted keyword accounting (`KeywordTally`)
//! - Result bundles (`DiagnosisResult`, `AiDiagnosisReport`)
//! - AI-path evidence types (`AudioFeatures`, `CorpusStats`, `UserContext`)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Evidence Sources
// ============================================================================

/// Kind of text evidence feeding the aggregator
///
/// The kind fixes both the tally weight and the audit label. Scraped text
/// (titles, descriptions, comments, transcripts) carries weight 1; the
/// acoustic spectrogram match and the language-model opinion are
/// higher-trust signals and carry weight 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Video title
    Title,
    /// Video description
    Description,
    /// Viewer comment
    Comment,
    /// Video transcript
    Transcript,
    /// Label produced by the acoustic similarity comparison
    SpectrogramMatch,
    /// Diagnosis text produced by the language model
    AiDiagnosis,
}

impl SourceKind {
    /// Tally weight contributed by one occurrence from this source
    pub fn weight(&self) -> u32 {
        match self {
            SourceKind::SpectrogramMatch | SourceKind::AiDiagnosis => 2,
            _ => 1,
        }
    }

    /// Whether texts of this kind also contribute a normalized diagnosis
    /// sentence candidate (comments and transcripts contribute keywords only)
    pub fn contributes_sentence(&self) -> bool {
        !matches!(self, SourceKind::Comment | SourceKind::Transcript)
    }

    /// Human-readable audit entry for a non-empty collection of this kind
    pub fn audit_label(&self, count: usize) -> String {
        match self {
            SourceKind::Title => format!("YouTube titles ({})", count),
            SourceKind::Description => format!("YouTube descriptions ({})", count),
            SourceKind::Comment => format!("YouTube comments ({})", count),
            SourceKind::Transcript => format!("YouTube transcripts ({})", count),
            SourceKind::SpectrogramMatch => "Spectrogram match".to_string(),
            SourceKind::AiDiagnosis => "AI analysis".to_string(),
        }
    }
}

/// Materialized text corpus for one diagnostic session
///
/// Every collection is optional in the sense that it may be empty; the
/// acquisition collaborators hand in whatever they managed to gather.
/// A failed download or an unavailable transcript is simply absent here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceCorpus {
    /// Video titles
    #[serde(default)]
    pub titles: Vec<String>,
    /// Video descriptions
    #[serde(default)]
    pub descriptions: Vec<String>,
    /// Viewer comments
    #[serde(default)]
    pub comments: Vec<String>,
    /// Video transcripts
    #[serde(default)]
    pub transcripts: Vec<String>,
    /// Acoustic spectrogram match label (0 or 1)
    #[serde(default)]
    pub spectrogram_match: Option<String>,
    /// Language-model diagnosis text (0 or 1)
    #[serde(default)]
    pub ai_diagnosis: Option<String>,
}

// ============================================================================
// Vehicle Identity
// ============================================================================

/// Vehicle identity used for plausibility classification
///
/// The turbo/diesel features are computed fresh per call by
/// `VehicleSpecChecker`, never cached on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Manufacturer name (e.g. "BMW")
    pub manufacturer: String,
    /// Model name (e.g. "335i")
    pub model: String,
    /// Model year
    pub year: i32,
}

impl VehicleProfile {
    /// Create a new vehicle profile
    pub fn new(manufacturer: impl Into<String>, model: impl Into<String>, year: i32) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
            year,
        }
    }
}

// ============================================================================
// Weighted Keyword Tally
// ============================================================================

/// Weighted keyword occurrence counts with deterministic ranking
///
/// Counts live in a map; a separate first-seen order vector makes ranking
/// of equal counts independent of hash iteration order. Because the
/// aggregator scans collections in a fixed order, equal-count keywords rank
/// the same way on every run.
#[derive(Debug, Clone, Default)]
pub struct KeywordTally {
    counts: HashMap<String, u32>,
    first_seen: Vec<String>,
}

impl KeywordTally {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to a keyword's count
    pub fn add(&mut self, keyword: &str, weight: u32) {
        if !self.counts.contains_key(keyword) {
            self.first_seen.push(keyword.to_string());
        }
        *self.counts.entry(keyword.to_string()).or_insert(0) += weight;
    }

    /// Weighted count for one keyword (0 if never seen)
    pub fn count(&self, keyword: &str) -> u32 {
        self.counts.get(keyword).copied().unwrap_or(0)
    }

    /// Sum of weighted counts across all keywords
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Number of distinct keywords
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no keyword was tallied
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All keywords ranked by descending weighted count
    ///
    /// Equal counts keep their first-seen order (the sort is stable over
    /// the insertion-order vector).
    pub fn ranked(&self) -> Vec<(String, u32)> {
        let mut ranked: Vec<(String, u32)> = self
            .first_seen
            .iter()
            .map(|keyword| (keyword.clone(), self.count(keyword)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `n` highest-ranked keywords
    pub fn top(&self, n: usize) -> Vec<(String, u32)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

// ============================================================================
// Result Bundles
// ============================================================================

/// Final aggregated diagnosis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisResult {
    /// Human-readable diagnosis sentence
    pub diagnosis: String,
    /// Consensus confidence, always within [0, 0.95]
    pub confidence: f64,
    /// Audit entries, one per non-empty source collection
    pub sources: Vec<String>,
    /// Surviving keywords, ranked, at most 5
    pub keywords: Vec<String>,
    /// Weighted counts of the surviving keywords
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub keyword_counts: HashMap<String, u32>,
}

/// Report wrapping a standalone language-model diagnosis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiDiagnosisReport {
    /// Diagnosis text as produced by the language model
    pub diagnosis: String,
    /// Availability-based confidence, 0-95
    pub confidence: u8,
    /// Always true; distinguishes this path from the aggregated consensus
    pub ai_generated: bool,
    /// Which evidence sources were available to the model
    pub sources_used: Vec<String>,
}

// ============================================================================
// AI-Path Evidence
// ============================================================================

/// Acoustic feature readings from the excluded audio analysis collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioFeatures {
    /// Dominant frequency (Hz)
    pub dominant_frequency: f64,
    /// RMS vibration energy
    pub rms_energy: f64,
    /// Zero crossing rate
    pub zero_crossing_rate: f64,
    /// Spectral bandwidth (Hz)
    pub spectral_bandwidth: f64,
    /// Spectral rolloff (Hz)
    pub spectral_rolloff: f64,
}

/// Best acoustic match against a reference video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcousticMatch {
    /// Title of the matched reference video
    pub video_title: String,
    /// Similarity in [0, 1]
    pub similarity: f64,
}

/// Corpus availability summary for the AI confidence scorer
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    /// Number of videos gathered (title count)
    pub video_count: usize,
    /// Number of comments gathered
    pub comment_count: usize,
    /// Number of transcripts gathered
    pub transcript_count: usize,
    /// Best acoustic match, if any
    pub best_match: Option<AcousticMatch>,
}

impl CorpusStats {
    /// Summarize a corpus together with its best acoustic match
    pub fn from_corpus(corpus: &EvidenceCorpus, best_match: Option<AcousticMatch>) -> Self {
        Self {
            video_count: corpus.titles.len(),
            comment_count: corpus.comments.len(),
            transcript_count: corpus.transcripts.len(),
            best_match,
        }
    }
}

/// Structured user-supplied context about the noise
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserContext {
    /// Free-text description of the sound
    #[serde(default)]
    pub audio_description: Option<String>,
    /// Occurrence tags ("braking", "cold start", ...)
    #[serde(default)]
    pub occurrence: Vec<String>,
    /// How long the issue has existed
    #[serde(default)]
    pub issue_duration: Option<String>,
    /// Whether it is getting worse
    #[serde(default)]
    pub progression: Option<String>,
    /// Recent maintenance or repairs
    #[serde(default)]
    pub recent_work: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_weights() {
        assert_eq!(SourceKind::Title.weight(), 1);
        assert_eq!(SourceKind::Description.weight(), 1);
        assert_eq!(SourceKind::Comment.weight(), 1);
        assert_eq!(SourceKind::Transcript.weight(), 1);
        assert_eq!(SourceKind::SpectrogramMatch.weight(), 2);
        assert_eq!(SourceKind::AiDiagnosis.weight(), 2);
    }

    #[test]
    fn test_sentence_contribution() {
        assert!(SourceKind::Title.contributes_sentence());
        assert!(SourceKind::Description.contributes_sentence());
        assert!(!SourceKind::Comment.contributes_sentence());
        assert!(!SourceKind::Transcript.contributes_sentence());
        assert!(SourceKind::SpectrogramMatch.contributes_sentence());
        assert!(SourceKind::AiDiagnosis.contributes_sentence());
    }

    #[test]
    fn test_audit_labels() {
        assert_eq!(SourceKind::Title.audit_label(12), "YouTube titles (12)");
        assert_eq!(
            SourceKind::Transcript.audit_label(3),
            "YouTube transcripts (3)"
        );
        assert_eq!(SourceKind::SpectrogramMatch.audit_label(1), "Spectrogram match");
        assert_eq!(SourceKind::AiDiagnosis.audit_label(1), "AI analysis");
    }

    #[test]
    fn test_tally_weighted_counts() {
        let mut tally = KeywordTally::new();
        tally.add("brake", 1);
        tally.add("brake", 2);
        tally.add("bearing", 1);

        assert_eq!(tally.count("brake"), 3);
        assert_eq!(tally.count("bearing"), 1);
        assert_eq!(tally.count("turbo"), 0);
        assert_eq!(tally.total(), 4);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn test_tally_ranked_descending() {
        let mut tally = KeywordTally::new();
        tally.add("brake", 1);
        tally.add("bearing", 1);
        tally.add("bearing", 1);

        let ranked = tally.ranked();
        assert_eq!(ranked[0], ("bearing".to_string(), 2));
        assert_eq!(ranked[1], ("brake".to_string(), 1));
    }

    #[test]
    fn test_tally_tie_break_is_first_seen_order() {
        let mut tally = KeywordTally::new();
        tally.add("rotor", 1);
        tally.add("pad", 1);
        tally.add("caliper", 1);

        // All counts equal: first-seen order decides
        let ranked = tally.ranked();
        let keywords: Vec<&str> = ranked.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keywords, vec!["rotor", "pad", "caliper"]);
    }

    #[test]
    fn test_tally_top_truncates() {
        let mut tally = KeywordTally::new();
        for keyword in ["a", "b", "c", "d", "e", "f", "g"] {
            tally.add(keyword, 1);
        }
        assert_eq!(tally.top(5).len(), 5);
    }

    #[test]
    fn test_corpus_stats_from_corpus() {
        let corpus = EvidenceCorpus {
            titles: vec!["one".to_string(), "two".to_string()],
            comments: vec!["c".to_string()],
            ..Default::default()
        };

        let stats = CorpusStats::from_corpus(&corpus, None);
        assert_eq!(stats.video_count, 2);
        assert_eq!(stats.comment_count, 1);
        assert_eq!(stats.transcript_count, 0);
        assert!(stats.best_match.is_none());
    }

    #[test]
    fn test_diagnosis_result_serializes_without_empty_counts() {
        let result = DiagnosisResult {
            diagnosis: "Unable to determine issue - insufficient data".to_string(),
            confidence: 0.3,
            sources: Vec::new(),
            keywords: Vec::new(),
            keyword_counts: HashMap::new(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("keyword_counts").is_none());
        assert_eq!(json["confidence"], 0.3);
    }
}

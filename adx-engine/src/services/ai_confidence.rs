//! Confidence scoring for standalone language-model diagnoses
//!
//! Rates the availability and quality of the evidence handed to the
//! language model, not keyword dominance: base score plus additive bonuses
//! for a usable audio signal, corpus size, comments, transcripts, acoustic
//! match quality, and user-supplied context, capped at 95. Independent of
//! `ConsensusConfidence`; the two scorers are never combined.

use crate::types::{AudioFeatures, CorpusStats, UserContext};
use tracing::debug;

/// Availability-based confidence scorer for AI-generated diagnoses
pub struct AiConfidenceScorer {
    /// Starting score before any bonus
    base: u8,
    /// Upper bound on the reported score
    cap: u8,
    /// Minimum RMS energy counting as a usable vibration signal
    rms_floor: f64,
    /// Zero-crossing-rate band counting as a normal pattern (exclusive)
    zcr_band: (f64, f64),
}

impl AiConfidenceScorer {
    /// Create a scorer with the standard base (70) and cap (95)
    pub fn new() -> Self {
        Self {
            base: 70,
            cap: 95,
            rms_floor: 0.05,
            zcr_band: (0.05, 0.4),
        }
    }

    /// Score a language-model diagnosis by the evidence available to it
    pub fn score(
        &self,
        audio: Option<&AudioFeatures>,
        corpus: Option<&CorpusStats>,
        context: Option<&UserContext>,
    ) -> u8 {
        let mut confidence = u32::from(self.base);

        if let Some(audio) = audio {
            if audio.rms_energy > self.rms_floor {
                confidence += 5;
            }
            if audio.zero_crossing_rate > self.zcr_band.0
                && audio.zero_crossing_rate < self.zcr_band.1
            {
                confidence += 5;
            }
        }

        if let Some(corpus) = corpus {
            confidence += match corpus.video_count {
                n if n >= 10 => 10,
                n if n >= 5 => 7,
                n if n >= 1 => 3,
                _ => 0,
            };

            if corpus.comment_count > 0 {
                confidence += 3;
            }
            if corpus.transcript_count > 0 {
                confidence += 3;
            }

            if let Some(best_match) = &corpus.best_match {
                if best_match.similarity > 0.7 {
                    confidence += 5;
                } else if best_match.similarity > 0.5 {
                    confidence += 3;
                }
            }
        }

        if let Some(context) = context {
            if context
                .audio_description
                .as_ref()
                .is_some_and(|d| !d.is_empty())
            {
                confidence += 3;
            }
            if !context.occurrence.is_empty() {
                confidence += 2;
            }
        }

        let score = confidence.min(u32::from(self.cap)) as u8;
        debug!(score = score, "Scored AI diagnosis confidence");
        score
    }
}

impl Default for AiConfidenceScorer {
    fn default() -> Self {
        Self::new()
    }
}

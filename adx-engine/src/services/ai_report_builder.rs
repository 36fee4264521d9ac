//! Prompt context assembly and report packaging for the AI diagnosis path
//!
//! The language-model call itself lives in an external collaborator; this
//! service does the pure work on either side of it. Going in, it formats
//! every available evidence source into one prompt context block. Coming
//! back, it wraps the model's diagnosis text into an `AiDiagnosisReport`
//! with an availability-based confidence score and a source audit.

use crate::services::ai_confidence::AiConfidenceScorer;
use crate::types::{
    AcousticMatch, AiDiagnosisReport, AudioFeatures, CorpusStats, EvidenceCorpus, UserContext,
    VehicleProfile,
};
use tracing::debug;

/// Report builder for standalone language-model diagnoses
pub struct AiReportBuilder {
    scorer: AiConfidenceScorer,
    /// Maximum titles included in the prompt context
    max_titles: usize,
    /// Maximum descriptions included, and per-description excerpt length
    max_descriptions: usize,
    description_excerpt_chars: usize,
    /// Maximum comments included, and per-comment excerpt length
    max_comments: usize,
    comment_excerpt_chars: usize,
    /// Maximum transcripts included, and per-transcript excerpt length
    max_transcripts: usize,
    transcript_excerpt_chars: usize,
}

impl AiReportBuilder {
    /// Create a builder with the standard prompt caps
    pub fn new() -> Self {
        Self {
            scorer: AiConfidenceScorer::new(),
            max_titles: 15,
            max_descriptions: 10,
            description_excerpt_chars: 200,
            max_comments: 15,
            comment_excerpt_chars: 150,
            max_transcripts: 5,
            transcript_excerpt_chars: 300,
        }
    }

    /// Assemble the prompt context from every available evidence source
    pub fn build_context(
        &self,
        vehicle: &VehicleProfile,
        sound_location: &str,
        audio: &AudioFeatures,
        corpus: Option<&EvidenceCorpus>,
        best_match: Option<&AcousticMatch>,
        context: Option<&UserContext>,
    ) -> String {
        let mut parts: Vec<String> = Vec::new();

        parts.push(format!(
            "VEHICLE: {} {} {}",
            vehicle.year, vehicle.manufacturer, vehicle.model
        ));
        parts.push(format!("SOUND LOCATION: {}", sound_location));

        parts.push("\nAUDIO ANALYSIS:".to_string());
        parts.push(format!(
            "- Dominant Frequency: {:.0} Hz",
            audio.dominant_frequency
        ));
        parts.push(format!("- Vibration Level (RMS): {:.3}", audio.rms_energy));
        parts.push(format!(
            "- Zero Crossing Rate: {:.3}",
            audio.zero_crossing_rate
        ));
        parts.push(format!(
            "- Spectral Bandwidth: {:.0} Hz",
            audio.spectral_bandwidth
        ));
        parts.push(format!(
            "- Spectral Rolloff: {:.0} Hz",
            audio.spectral_rolloff
        ));

        if let Some(context) = context {
            if let Some(description) = context.audio_description.as_ref().filter(|d| !d.is_empty())
            {
                parts.push(format!("\nUSER DESCRIPTION: {}", description));
            }
            if !context.occurrence.is_empty() {
                parts.push(format!("OCCURS WHEN: {}", context.occurrence.join(", ")));
            }
            if let Some(duration) = context.issue_duration.as_ref().filter(|d| !d.is_empty()) {
                parts.push(format!("ISSUE DURATION: {}", duration));
            }
            if let Some(progression) = context.progression.as_ref().filter(|p| !p.is_empty()) {
                parts.push(format!("PROGRESSION: {}", progression));
            }
            if let Some(recent_work) = context.recent_work.as_ref().filter(|w| !w.is_empty()) {
                parts.push(format!("RECENT WORK: {}", recent_work));
            }
        }

        if let Some(corpus) = corpus {
            if !corpus.titles.is_empty() {
                parts.push(format!(
                    "\nYOUTUBE VIDEO TITLES ({} videos):",
                    corpus.titles.len()
                ));
                for (i, title) in corpus.titles.iter().take(self.max_titles).enumerate() {
                    parts.push(format!("{}. {}", i + 1, title));
                }
            }

            if !corpus.descriptions.is_empty() {
                parts.push("\nYOUTUBE VIDEO DESCRIPTIONS:".to_string());
                for (i, description) in corpus
                    .descriptions
                    .iter()
                    .take(self.max_descriptions)
                    .enumerate()
                {
                    let excerpt = excerpt_chars(description, self.description_excerpt_chars);
                    if !excerpt.is_empty() {
                        parts.push(format!("{}. {}...", i + 1, excerpt));
                    }
                }
            }

            if !corpus.comments.is_empty() {
                parts.push(format!(
                    "\nYOUTUBE COMMENTS ({} comments):",
                    corpus.comments.len()
                ));
                for comment in corpus.comments.iter().take(self.max_comments) {
                    parts.push(format!(
                        "- {}",
                        excerpt_chars(comment, self.comment_excerpt_chars)
                    ));
                }
            }

            if !corpus.transcripts.is_empty() {
                parts.push(format!(
                    "\nYOUTUBE VIDEO TRANSCRIPTS ({} transcripts):",
                    corpus.transcripts.len()
                ));
                for (i, transcript) in corpus
                    .transcripts
                    .iter()
                    .take(self.max_transcripts)
                    .enumerate()
                {
                    let excerpt = excerpt_chars(transcript, self.transcript_excerpt_chars);
                    if !excerpt.is_empty() {
                        parts.push(format!("{}. {}...", i + 1, excerpt));
                    }
                }
            }
        }

        if let Some(best_match) = best_match {
            parts.push(format!(
                "\nBEST AUDIO MATCH: {} ({:.1}% similarity)",
                best_match.video_title,
                best_match.similarity * 100.0
            ));
        }

        parts.push(
            "\n\nBased on ALL the data above (especially the YouTube titles, descriptions, \
             comments, and transcripts), what is the MOST COMMON diagnosis mentioned? \
             Provide a specific, actionable diagnosis:"
                .to_string(),
        );

        let context_block = parts.join("\n");
        debug!(
            chars = context_block.len(),
            "Assembled AI diagnosis context"
        );
        context_block
    }

    /// Wrap a language-model diagnosis into a confidence-scored report
    pub fn build_report(
        &self,
        diagnosis: impl Into<String>,
        audio: Option<&AudioFeatures>,
        corpus: Option<&EvidenceCorpus>,
        best_match: Option<&AcousticMatch>,
        context: Option<&UserContext>,
    ) -> AiDiagnosisReport {
        let stats = corpus.map(|c| CorpusStats::from_corpus(c, best_match.cloned()));
        let confidence = self.scorer.score(audio, stats.as_ref(), context);

        let mut sources_used: Vec<String> = Vec::new();
        if audio.is_some() {
            sources_used.push("Audio analysis".to_string());
        }
        if let Some(corpus) = corpus {
            sources_used.push(format!("{} YouTube videos", corpus.titles.len()));
            if !corpus.comments.is_empty() {
                sources_used.push(format!("{} comments", corpus.comments.len()));
            }
            if !corpus.transcripts.is_empty() {
                sources_used.push(format!("{} transcripts", corpus.transcripts.len()));
            }
        }
        if context
            .and_then(|c| c.audio_description.as_ref())
            .is_some_and(|d| !d.is_empty())
        {
            sources_used.push("User description".to_string());
        }

        AiDiagnosisReport {
            diagnosis: diagnosis.into(),
            confidence,
            ai_generated: true,
            sources_used,
        }
    }
}

impl Default for AiReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// First `max_chars` characters of a text, safe on multi-byte boundaries
fn excerpt_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle() -> VehicleProfile {
        VehicleProfile::new("BMW", "335i", 2018)
    }

    fn audio() -> AudioFeatures {
        AudioFeatures {
            dominant_frequency: 850.4,
            rms_energy: 0.12,
            zero_crossing_rate: 0.21,
            spectral_bandwidth: 1500.0,
            spectral_rolloff: 3200.0,
        }
    }

    #[test]
    fn test_context_includes_vehicle_and_audio() {
        let builder = AiReportBuilder::new();
        let context = builder.build_context(&vehicle(), "front left", &audio(), None, None, None);

        assert!(context.contains("VEHICLE: 2018 BMW 335i"));
        assert!(context.contains("SOUND LOCATION: front left"));
        assert!(context.contains("- Dominant Frequency: 850 Hz"));
        assert!(context.contains("- Vibration Level (RMS): 0.120"));
        assert!(context.ends_with("actionable diagnosis:"));
    }

    #[test]
    fn test_context_includes_user_context() {
        let builder = AiReportBuilder::new();
        let user_context = UserContext {
            audio_description: Some("grinding when braking".to_string()),
            occurrence: vec!["braking".to_string(), "turning".to_string()],
            issue_duration: Some("two weeks".to_string()),
            progression: Some("getting worse".to_string()),
            recent_work: None,
        };

        let context = builder.build_context(
            &vehicle(),
            "front left",
            &audio(),
            None,
            None,
            Some(&user_context),
        );

        assert!(context.contains("USER DESCRIPTION: grinding when braking"));
        assert!(context.contains("OCCURS WHEN: braking, turning"));
        assert!(context.contains("ISSUE DURATION: two weeks"));
        assert!(context.contains("PROGRESSION: getting worse"));
        assert!(!context.contains("RECENT WORK"));
    }

    #[test]
    fn test_context_caps_titles() {
        let builder = AiReportBuilder::new();
        let corpus = EvidenceCorpus {
            titles: (0..20).map(|i| format!("title {}", i)).collect(),
            ..Default::default()
        };

        let context = builder.build_context(
            &vehicle(),
            "front",
            &audio(),
            Some(&corpus),
            None,
            None,
        );

        // Header counts the full corpus, listing stops at the cap
        assert!(context.contains("YOUTUBE VIDEO TITLES (20 videos):"));
        assert!(context.contains("15. title 14"));
        assert!(!context.contains("16. title 15"));
    }

    #[test]
    fn test_context_excerpts_are_char_safe() {
        let builder = AiReportBuilder::new();
        let corpus = EvidenceCorpus {
            descriptions: vec!["ü".repeat(500)],
            ..Default::default()
        };

        let context = builder.build_context(
            &vehicle(),
            "front",
            &audio(),
            Some(&corpus),
            None,
            None,
        );

        // 200 chars of "ü" plus the trailing ellipsis
        assert!(context.contains(&format!("1. {}...", "ü".repeat(200))));
    }

    #[test]
    fn test_context_includes_best_match() {
        let builder = AiReportBuilder::new();
        let best_match = AcousticMatch {
            video_title: "BMW 335i wastegate rattle".to_string(),
            similarity: 0.823,
        };

        let context = builder.build_context(
            &vehicle(),
            "engine bay",
            &audio(),
            None,
            Some(&best_match),
            None,
        );

        assert!(context.contains("BEST AUDIO MATCH: BMW 335i wastegate rattle (82.3% similarity)"));
    }

    #[test]
    fn test_report_sources_used() {
        let builder = AiReportBuilder::new();
        let corpus = EvidenceCorpus {
            titles: (0..12).map(|i| format!("title {}", i)).collect(),
            comments: vec!["same here".to_string(); 8],
            transcripts: vec!["transcript".to_string(); 2],
            ..Default::default()
        };
        let user_context = UserContext {
            audio_description: Some("whining".to_string()),
            ..Default::default()
        };

        let report = builder.build_report(
            "Wastegate rattle - replace actuator",
            Some(&audio()),
            Some(&corpus),
            None,
            Some(&user_context),
        );

        assert!(report.ai_generated);
        assert_eq!(report.diagnosis, "Wastegate rattle - replace actuator");
        assert_eq!(
            report.sources_used,
            vec![
                "Audio analysis",
                "12 YouTube videos",
                "8 comments",
                "2 transcripts",
                "User description",
            ]
        );
        assert!(report.confidence <= 95);
    }

    #[test]
    fn test_report_confidence_reflects_availability() {
        let builder = AiReportBuilder::new();

        let bare = builder.build_report("diagnosis", None, None, None, None);
        assert_eq!(bare.confidence, 70);
        assert!(bare.sources_used.is_empty());

        let rich_corpus = EvidenceCorpus {
            titles: (0..12).map(|i| format!("t{}", i)).collect(),
            comments: vec!["c".to_string()],
            transcripts: vec!["t".to_string()],
            ..Default::default()
        };
        let rich = builder.build_report(
            "diagnosis",
            Some(&audio()),
            Some(&rich_corpus),
            Some(&AcousticMatch {
                video_title: "ref".to_string(),
                similarity: 0.9,
            }),
            None,
        );
        assert!(rich.confidence > bare.confidence);
    }
}

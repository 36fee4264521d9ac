//! Service modules for the diagnosis aggregation pipeline
//!
//! One component per file, chained by `DiagnosisEngine`:
//! extraction → weighted aggregation → plausibility filtering →
//! confidence scoring → composition. The AI-path services
//! (`ai_confidence`, `ai_report_builder`) wrap a standalone language-model
//! diagnosis and stay independent of the consensus pipeline.

pub mod ai_confidence;
pub mod ai_report_builder;
pub mod confidence_assessor;
pub mod diagnosis_composer;
pub mod diagnosis_engine;
pub mod keyword_extractor;
pub mod source_aggregator;
pub mod vehicle_checker;

pub use ai_confidence::AiConfidenceScorer;
pub use ai_report_builder::AiReportBuilder;
pub use confidence_assessor::ConsensusConfidence;
pub use diagnosis_composer::{ComposerError, DiagnosisComposer};
pub use diagnosis_engine::DiagnosisEngine;
pub use keyword_extractor::KeywordExtractor;
pub use source_aggregator::{AggregatedEvidence, SourceAggregator};
pub use vehicle_checker::VehicleSpecChecker;

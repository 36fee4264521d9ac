//! # ADX Engine
//!
//! Diagnosis aggregation and plausibility filtering for vehicle noise
//! complaints. Fuses keyword evidence from crowd-sourced video text, an
//! acoustic spectrogram match label, and a language-model opinion into one
//! ranked, confidence-scored diagnosis, and rejects candidates that are
//! physically impossible for the specific vehicle (a turbo fault on a car
//! with no turbocharger).
//!
//! The engine is a pure synchronous library. Collaborators materialize the
//! text corpora, acoustic features, and language-model responses elsewhere
//! and hand them in; no network, file, or database access happens here, and
//! no state is held across calls.

pub mod services;
pub mod types;
pub mod vocabulary;

pub use services::diagnosis_engine::DiagnosisEngine;
pub use types::{DiagnosisResult, EvidenceCorpus, VehicleProfile};

//! Vehicle drivetrain classification and plausibility filtering
//!
//! Classifies whether a vehicle plausibly has a turbocharger or a diesel
//! engine, then drops diagnosis candidates that contradict the
//! classification. Filtering never empties a non-empty candidate list:
//! when every candidate would be dropped, the unfiltered list is kept.

use crate::types::VehicleProfile;
use crate::vocabulary::{
    TurboModelTable, DIESEL_ISSUE_KEYWORDS, DIESEL_MODEL_KEYWORDS, GENERIC_TURBO_MODEL_KEYWORDS,
    TURBO_ERA_MANUFACTURERS, TURBO_ERA_START_YEAR, TURBO_ISSUE_KEYWORDS,
};
use tracing::{debug, info};

/// Vehicle specification checker
pub struct VehicleSpecChecker {
    turbo_models: TurboModelTable,
}

impl VehicleSpecChecker {
    /// Create a checker with the compiled-in turbo-model table
    pub fn new() -> Self {
        Self {
            turbo_models: TurboModelTable::default(),
        }
    }

    /// Create a checker with a replacement turbo-model table
    pub fn with_table(turbo_models: TurboModelTable) -> Self {
        Self { turbo_models }
    }

    /// Whether the vehicle likely has a turbocharger
    ///
    /// Checked in order: broad-turbocharging era (German makes from 2016),
    /// the per-manufacturer known-turbo-model table, then generic turbo
    /// keywords in the model name.
    pub fn has_turbo(&self, profile: &VehicleProfile) -> bool {
        if profile.year >= TURBO_ERA_START_YEAR
            && TURBO_ERA_MANUFACTURERS.contains(&profile.manufacturer.as_str())
        {
            return true;
        }

        let model_lower = profile.model.to_lowercase();

        if let Some(models) = self.turbo_models.models_for(&profile.manufacturer) {
            if models
                .iter()
                .any(|known| model_lower.contains(&known.to_lowercase()))
            {
                return true;
            }
        }

        GENERIC_TURBO_MODEL_KEYWORDS
            .iter()
            .any(|keyword| model_lower.contains(keyword))
    }

    /// Whether the vehicle is likely a diesel
    ///
    /// Model-name keyword match only; the "d" keyword makes this overbroad
    /// (see `DIESEL_MODEL_KEYWORDS`).
    pub fn has_diesel(&self, profile: &VehicleProfile) -> bool {
        let model_lower = profile.model.to_lowercase();
        DIESEL_MODEL_KEYWORDS
            .iter()
            .any(|keyword| model_lower.contains(keyword))
    }

    /// Whether a diagnosis text is plausible for this vehicle
    ///
    /// Turbo-related diagnoses require a turbo vehicle; diesel-related
    /// diagnoses require a diesel vehicle. Everything else passes.
    pub fn is_plausible(&self, diagnosis: &str, profile: &VehicleProfile) -> bool {
        let diagnosis_lower = diagnosis.to_lowercase();

        let turbo_issue = TURBO_ISSUE_KEYWORDS
            .iter()
            .any(|keyword| diagnosis_lower.contains(keyword));
        if turbo_issue && !self.has_turbo(profile) {
            info!(
                manufacturer = %profile.manufacturer,
                model = %profile.model,
                year = profile.year,
                "Filtered out turbo-related diagnosis for non-turbo vehicle"
            );
            return false;
        }

        let diesel_issue = DIESEL_ISSUE_KEYWORDS
            .iter()
            .any(|keyword| diagnosis_lower.contains(keyword));
        if diesel_issue && !self.has_diesel(profile) {
            info!(
                manufacturer = %profile.manufacturer,
                model = %profile.model,
                "Filtered out diesel-related diagnosis for non-diesel vehicle"
            );
            return false;
        }

        true
    }

    /// Drop implausible candidates from a ranked keyword list
    ///
    /// Each keyword is probed as "<keyword> issue". If filtering would drop
    /// every candidate, the unfiltered list is returned unchanged: never
    /// surface zero candidates when keywords existed.
    pub fn filter_candidates(
        &self,
        candidates: &[(String, u32)],
        profile: &VehicleProfile,
    ) -> Vec<(String, u32)> {
        let filtered: Vec<(String, u32)> = candidates
            .iter()
            .filter(|(keyword, _)| self.is_plausible(&format!("{} issue", keyword), profile))
            .cloned()
            .collect();

        if filtered.is_empty() {
            debug!("Plausibility filter would drop every candidate, keeping unfiltered list");
            return candidates.to_vec();
        }

        filtered
    }
}

impl Default for VehicleSpecChecker {
    fn default() -> Self {
        Self::new()
    }
}

//! Final diagnosis sentence composition
//!
//! Names the top-ranked keyword, and the runner-up too when it reaches 60%
//! of the leader's weighted count. The ranked list arrives already ordered
//! by descending count with first-seen tie-breaks, so composition itself is
//! a straight read of the first two entries.

use thiserror::Error;
use tracing::debug;

/// Composer configuration errors
#[derive(Debug, Error)]
pub enum ComposerError {
    /// Runner-up ratio outside (0, 1]
    #[error("Invalid secondary ratio: {0}")]
    InvalidRatio(f64),
}

/// Diagnosis sentence composer
pub struct DiagnosisComposer {
    /// Fraction of the top count a runner-up must reach to be named
    secondary_ratio: f64,
}

impl DiagnosisComposer {
    /// Create a composer with the standard runner-up ratio (0.6)
    pub fn new() -> Self {
        Self {
            secondary_ratio: 0.6,
        }
    }

    /// Create a composer with a custom runner-up ratio
    ///
    /// # Errors
    /// Returns `ComposerError::InvalidRatio` unless `ratio` is in (0, 1].
    pub fn with_secondary_ratio(ratio: f64) -> Result<Self, ComposerError> {
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ComposerError::InvalidRatio(ratio));
        }

        Ok(Self {
            secondary_ratio: ratio,
        })
    }

    /// Compose the diagnosis sentence from a ranked candidate list
    ///
    /// Returns `None` for an empty list (callers resolve the empty tally to
    /// the insufficient-data sentinel before composing).
    pub fn compose(&self, ranked: &[(String, u32)]) -> Option<String> {
        let (top_keyword, top_count) = ranked.first()?;

        let mut diagnosis = format!("Likely {} issue detected", top_keyword);

        if let Some((second_keyword, second_count)) = ranked.get(1) {
            if f64::from(*second_count) >= f64::from(*top_count) * self.secondary_ratio {
                diagnosis = format!(
                    "Likely {} or {} issue detected",
                    top_keyword, second_keyword
                );
            }
        }

        debug!(diagnosis = %diagnosis, "Composed diagnosis");
        Some(diagnosis)
    }
}

impl Default for DiagnosisComposer {
    fn default() -> Self {
        Self::new()
    }
}

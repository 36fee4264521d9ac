//! Diagnostic vocabulary and vehicle feature tables
//!
//! Immutable configuration data for the pipeline: the closed keyword list
//! scanned by the extractor, the per-manufacturer known-turbo-model table,
//! and the model/issue keyword sets used by the plausibility filter. The
//! compiled-in defaults can be replaced wholesale through the serde-derived
//! types; nothing here is derived at runtime.

use adx_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Closed diagnostic keyword list, in scan order
///
/// Terms overlap on purpose ("pad" and "pads", "belt" and "timing belt"):
/// the extractor reports every matching term, and the weighted tally
/// resolves which wording dominates.
pub const DIAGNOSTIC_KEYWORDS: &[&str] = &[
    "brake", "brakes", "pad", "pads", "rotor", "rotors", "caliper",
    "bearing", "bearings", "wheel bearing", "hub bearing",
    "belt", "serpentine", "serpentine belt", "timing belt", "timing chain",
    "exhaust", "muffler", "catalytic converter", "manifold",
    "suspension", "shock", "shocks", "strut", "struts", "strut mount",
    "engine", "motor", "piston", "cylinder",
    "transmission", "gearbox", "clutch",
    "turbo", "turbocharger", "wastegate", "boost",
    "alternator", "starter", "battery",
    "pulley", "idler", "tensioner", "timing chain tensioner",
    "mount", "engine mount", "motor mount", "transmission mount",
    "cv joint", "cv axle", "axle", "driveshaft",
    "tire", "tires", "wheel",
    "leak", "leaking", "fluid",
    "worn", "wear", "damage", "damaged",
    "loose", "broken", "cracked",
    "misfire", "ignition", "spark plug", "coil",
    "sway bar", "ball joint", "tie rod", "control arm",
    "power steering", "rack and pinion", "steering",
    "vanos", "variable valve timing", "vvt",
];

/// Model-name keywords implying a factory turbocharger
pub const GENERIC_TURBO_MODEL_KEYWORDS: &[&str] =
    &["turbo", "tsi", "tfsi", "ecoboost", "tdi", "gti"];

/// Model-name keywords implying a diesel engine
///
/// "d" is overbroad: any model name containing the letter d matches
/// (e.g. "Accord"). Known false-positive source, kept as-is.
pub const DIESEL_MODEL_KEYWORDS: &[&str] = &["diesel", "tdi", "d", "dci", "hdi", "crdi"];

/// Diagnosis keywords that only make sense on a turbocharged vehicle
pub const TURBO_ISSUE_KEYWORDS: &[&str] = &["turbo", "wastegate", "boost", "supercharger"];

/// Diagnosis keywords that only make sense on a diesel vehicle
pub const DIESEL_ISSUE_KEYWORDS: &[&str] = &["diesel", "dpf", "def", "egr"];

/// Manufacturers whose lineups are broadly turbocharged from 2016 on
pub const TURBO_ERA_MANUFACTURERS: &[&str] = &["BMW", "Audi", "Mercedes-Benz", "Volkswagen"];

/// First model year of the broad-turbocharging era
pub const TURBO_ERA_START_YEAR: i32 = 2016;

/// The closed keyword vocabulary scanned by the extractor
///
/// Scan order is the term order. Terms are stored lower-cased; matching is
/// case-insensitive substring containment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticVocabulary {
    terms: Vec<String>,
}

impl DiagnosticVocabulary {
    /// Build a vocabulary from an ordered term list
    ///
    /// # Errors
    /// Returns `Error::Config` if the list is empty.
    pub fn from_terms(terms: Vec<String>) -> Result<Self> {
        if terms.is_empty() {
            return Err(Error::Config("Vocabulary term list is empty".to_string()));
        }

        Ok(Self {
            terms: terms.into_iter().map(|t| t.to_lowercase()).collect(),
        })
    }

    /// Ordered terms
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True when the vocabulary has no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for DiagnosticVocabulary {
    fn default() -> Self {
        Self {
            terms: DIAGNOSTIC_KEYWORDS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Known-turbo models per manufacturer
///
/// Model entries are matched as case-insensitive substrings of the vehicle
/// model name. Manufacturers are looked up by exact name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurboModelTable {
    models: HashMap<String, Vec<String>>,
}

impl TurboModelTable {
    /// Known-turbo model list for a manufacturer, if the manufacturer is listed
    pub fn models_for(&self, manufacturer: &str) -> Option<&[String]> {
        self.models.get(manufacturer).map(Vec::as_slice)
    }

    /// Number of manufacturers listed
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True when no manufacturer is listed
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for TurboModelTable {
    fn default() -> Self {
        let entries: &[(&str, &[&str])] = &[
            ("BMW", &["335i", "535i", "M235i", "M135i", "340i", "440i", "X3 28i", "X5 35i"]),
            ("Audi", &["A3", "A4", "A6", "Q5", "TT", "S3", "S4", "S5"]),
            ("Mercedes-Benz", &["C250", "C300", "E250", "GLC250", "CLA250", "AMG"]),
            ("Volkswagen", &["GTI", "Golf R", "Jetta GLI", "Tiguan", "Passat"]),
            ("Ford", &["EcoBoost", "Mustang", "F-150", "Explorer"]),
            // Most Toyotas are non-turbo (recent models excepted)
            ("Toyota", &[]),
            ("Honda", &["Civic Type R", "Accord 2.0T"]),
            ("Mazda", &["CX-7", "CX-9", "MazdaSpeed"]),
            ("Hyundai", &["Veloster N", "Sonata 2.0T", "Santa Fe"]),
            ("Nissan", &["Juke", "Sentra", "Altima"]),
        ];

        let models = entries
            .iter()
            .map(|(manufacturer, models)| {
                (
                    manufacturer.to_string(),
                    models.iter().map(|m| m.to_string()).collect(),
                )
            })
            .collect();

        Self { models }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_order() {
        let vocabulary = DiagnosticVocabulary::default();
        assert_eq!(vocabulary.terms()[0], "brake");
        assert_eq!(vocabulary.len(), DIAGNOSTIC_KEYWORDS.len());
    }

    #[test]
    fn test_vocabulary_terms_are_lowercase() {
        let vocabulary = DiagnosticVocabulary::default();
        assert!(vocabulary
            .terms()
            .iter()
            .all(|t| t.chars().all(|c| !c.is_uppercase())));
    }

    #[test]
    fn test_from_terms_lowercases() {
        let vocabulary =
            DiagnosticVocabulary::from_terms(vec!["Rattle".to_string(), "HUM".to_string()])
                .unwrap();
        assert_eq!(vocabulary.terms(), &["rattle".to_string(), "hum".to_string()]);
    }

    #[test]
    fn test_from_terms_rejects_empty() {
        assert!(DiagnosticVocabulary::from_terms(Vec::new()).is_err());
    }

    #[test]
    fn test_turbo_table_covers_ten_manufacturers() {
        let table = TurboModelTable::default();
        assert_eq!(table.len(), 10);
    }

    #[test]
    fn test_turbo_table_lookup() {
        let table = TurboModelTable::default();
        let bmw = table.models_for("BMW").unwrap();
        assert!(bmw.contains(&"335i".to_string()));

        // Listed manufacturer with no known-turbo models
        assert_eq!(table.models_for("Toyota").unwrap().len(), 0);

        // Unlisted manufacturer
        assert!(table.models_for("Peugeot").is_none());
    }

    #[test]
    fn test_vocabulary_round_trips_through_toml() {
        let vocabulary = DiagnosticVocabulary::default();
        let encoded = toml::to_string(&vocabulary).unwrap();
        let decoded: DiagnosticVocabulary = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.terms(), vocabulary.terms());
    }
}

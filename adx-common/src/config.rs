//! Configuration loading for ADX crates
//!
//! Host binaries read one TOML file covering logging and an optional
//! replacement for the compiled-in diagnostic vocabulary. The engine crate
//! itself never touches the filesystem; parsed configuration is handed in.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Logging configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Inline replacement for the compiled-in diagnostic vocabulary
///
/// Scan order is the list order; terms are matched case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyOverride {
    /// Ordered diagnostic terms
    pub terms: Vec<String>,
}

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Optional vocabulary replacement
    #[serde(default)]
    pub vocabulary: Option<VocabularyOverride>,
}

/// Parse configuration from TOML text
pub fn parse_toml_config(content: &str) -> Result<TomlConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
}

/// Read configuration from a TOML file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
    let config = parse_toml_config(&content)?;
    debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Write configuration to a TOML file, creating parent directories as needed
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;

    info!(path = %path.display(), "Wrote configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TomlConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(config.vocabulary.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_toml_config("").unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_logging_section() {
        let config = parse_toml_config("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_vocabulary_override() {
        let config = parse_toml_config(
            "[vocabulary]\nterms = [\"brake\", \"bearing\"]\n",
        )
        .unwrap();

        let vocabulary = config.vocabulary.unwrap();
        assert_eq!(vocabulary.terms, vec!["brake", "bearing"]);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_toml_config("[logging\nlevel = ");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adx").join("config.toml");

        let mut config = TomlConfig::default();
        config.logging.level = "warn".to_string();
        config.vocabulary = Some(VocabularyOverride {
            terms: vec!["rattle".to_string()],
        });

        write_toml_config(&config, &path).unwrap();
        let loaded = read_toml_config(&path).unwrap();

        assert_eq!(loaded.logging.level, "warn");
        assert_eq!(loaded.vocabulary.unwrap().terms, vec!["rattle"]);
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_toml_config(Path::new("/nonexistent/adx/config.toml"));
        assert!(result.is_err());
    }
}

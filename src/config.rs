/// Configuration for method-lineage
///
/// Supports loading from a TOML file with environment variable overrides.
/// Holds the similarity thresholds that tune the fuzzy half of change
/// classification and move detection.
use crate::error::{ConfigError, LineageError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Similarity thresholds for classification and matching
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Source file extension considered during cross-file move search
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
}

/// Tunable similarity thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Bodies with Jaro-Winkler similarity below this are a Body Change
    #[serde(default = "default_body_similarity")]
    pub body_similarity: f64,

    /// Signatures at or above this similarity are treated as unchanged
    #[serde(default = "default_signature_similarity")]
    pub signature_similarity: f64,

    /// Floor of the borderline band where edit distance breaks ties
    #[serde(default = "default_signature_review_floor")]
    pub signature_review_floor: f64,

    /// Edit distances below this count as formatting noise in the band
    #[serde(default = "default_signature_noise_edits")]
    pub signature_noise_edits: usize,

    /// Minimum body similarity for a cross-file rename/move match
    #[serde(default = "default_move_body_similarity")]
    pub move_body_similarity: f64,
}

fn default_body_similarity() -> f64 {
    0.95
}

fn default_signature_similarity() -> f64 {
    0.95
}

fn default_signature_review_floor() -> f64 {
    0.85
}

fn default_signature_noise_edits() -> usize {
    3
}

fn default_move_body_similarity() -> f64 {
    0.50
}

fn default_source_extension() -> String {
    ".java".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            source_extension: default_source_extension(),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            body_similarity: default_body_similarity(),
            signature_similarity: default_signature_similarity(),
            signature_review_floor: default_signature_review_floor(),
            signature_noise_edits: default_signature_noise_edits(),
            move_body_similarity: default_move_body_similarity(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LineageError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("METHOD_LINEAGE_BODY_SIMILARITY")
            && let Ok(parsed) = value.parse()
        {
            self.thresholds.body_similarity = parsed;
        }

        if let Ok(value) = std::env::var("METHOD_LINEAGE_SIGNATURE_SIMILARITY")
            && let Ok(parsed) = value.parse()
        {
            self.thresholds.signature_similarity = parsed;
        }

        if let Ok(value) = std::env::var("METHOD_LINEAGE_MOVE_BODY_SIMILARITY")
            && let Ok(parsed) = value.parse()
        {
            self.thresholds.move_body_similarity = parsed;
        }

        if let Ok(value) = std::env::var("METHOD_LINEAGE_SOURCE_EXTENSION") {
            self.source_extension = value;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), LineageError> {
        let unit_range = [
            ("thresholds.body_similarity", self.thresholds.body_similarity),
            (
                "thresholds.signature_similarity",
                self.thresholds.signature_similarity,
            ),
            (
                "thresholds.signature_review_floor",
                self.thresholds.signature_review_floor,
            ),
            (
                "thresholds.move_body_similarity",
                self.thresholds.move_body_similarity,
            ),
        ];
        for (key, value) in unit_range {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("must be between 0.0 and 1.0, got {}", value),
                }
                .into());
            }
        }

        if self.thresholds.signature_review_floor > self.thresholds.signature_similarity {
            return Err(ConfigError::InvalidValue {
                key: "thresholds.signature_review_floor".to_string(),
                reason: "must not exceed thresholds.signature_similarity".to_string(),
            }
            .into());
        }

        if self.source_extension.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "source_extension".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Create a new Config with defaults and environment overrides
    pub fn new() -> Result<Self, LineageError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}

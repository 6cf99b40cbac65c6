// File: src/config.rs
// Purpose: Configuration parsing from intake.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Intake form configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct IntakeConfig {
    #[serde(default)]
    pub form: FormConfig,

    #[serde(default)]
    pub review: ReviewConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Rule parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormConfig {
    /// Oldest accepted date of birth, in years before today (default: 120)
    #[serde(default = "default_max_age_years")]
    pub max_age_years: u32,
}

/// Review summary presentation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewConfig {
    #[serde(default = "default_mask_char")]
    pub mask_char: char,

    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_max_age_years() -> u32 {
    120
}

fn default_mask_char() -> char {
    crate::transform::DEFAULT_MASK
}

fn default_weight_unit() -> String {
    "lbs".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_age_years: default_max_age_years(),
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            mask_char: default_mask_char(),
            weight_unit: default_weight_unit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl IntakeConfig {
    /// Load configuration from intake.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: IntakeConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./intake.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("intake.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IntakeConfig::default();
        assert_eq!(config.form.max_age_years, 120);
        assert_eq!(config.review.mask_char, '•');
        assert_eq!(config.review.weight_unit, "lbs");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [review]
            mask_char = "*"
        "#;
        let config: IntakeConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.review.mask_char, '*');
        assert_eq!(config.review.weight_unit, "lbs");
        assert_eq!(config.form.max_age_years, 120);
    }

    #[test]
    fn test_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = IntakeConfig::load(dir.path().join("intake.toml")).unwrap();
        assert_eq!(missing, IntakeConfig::default());

        let empty = dir.path().join("empty.toml");
        fs::write(&empty, "   \n").unwrap();
        assert_eq!(IntakeConfig::load(&empty).unwrap(), IntakeConfig::default());
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("intake.toml");
        fs::write(&bad, "[form]\nmax_age_years = \"old\"").unwrap();
        let err = IntakeConfig::load(&bad).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse config file"));
    }
}

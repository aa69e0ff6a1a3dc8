//! Analysis configuration
//!
//! Loads optional scoring overrides from a `biaslint.toml` settings file.
//! Every field is optional: a missing key always falls back to the documented
//! default, so an empty (or absent) file yields stock behavior. Only an
//! unreadable or unparsable file is an error, and that error is fatal before
//! any analysis runs.
//!
//! # Settings format
//!
//! ```toml
//! # biaslint.toml
//!
//! [severity_multipliers]
//! critical = 2.0
//! high = 1.5
//! medium = 1.0
//! low = 0.5
//!
//! [category_weights]
//! gender-coded = 0.25
//! ageist = 0.25
//! religious = 0.20   # categories outside the built-in set work too
//!
//! [scoring]
//! normalization_factor = 100.0
//! base_points_per_issue = 10.0
//! length_normalization = true
//!
//! positive_indicators = ["equal opportunity employer", "inclusive"]
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Typed analysis settings with per-field defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub severity_multipliers: SeverityMultipliers,
    pub category_weights: CategoryWeights,
    pub scoring: ScoringSettings,
    /// Replaces the built-in positive-indicator phrase list when set.
    pub positive_indicators: Option<Vec<String>>,
}

/// Per-severity penalty multipliers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeverityMultipliers {
    pub critical: Option<f64>,
    pub high: Option<f64>,
    pub medium: Option<f64>,
    pub low: Option<f64>,
}

/// Per-category penalty weights. Unknown category names are accepted so that
/// custom dictionaries can weight their own categories.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    #[serde(rename = "gender-coded")]
    pub gender_coded: Option<f64>,
    pub ageist: Option<f64>,
    pub ableist: Option<f64>,
    #[serde(rename = "culture-fit")]
    pub culture_fit: Option<f64>,
    pub socioeconomic: Option<f64>,
    pub racial: Option<f64>,
    #[serde(flatten)]
    pub extra: HashMap<String, f64>,
}

/// Overall-score tuning knobs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Word count of a "standard" ad; default 100.
    pub normalization_factor: Option<f64>,
    /// Penalty points per issue before weighting; default 10.
    pub base_points_per_issue: Option<f64>,
    /// Divide the total penalty by a clamped length factor; default true.
    pub length_normalization: Option<bool>,
}

impl AnalysisConfig {
    /// Load settings from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AnalysisConfig = toml::from_str(&content)?;
        debug!(path = %path.display(), "loaded analysis settings");
        Ok(config)
    }
}

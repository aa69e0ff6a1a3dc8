//! Error types for biaslint
//!
//! Initialization-time failures (bad dictionary, bad settings file) are fatal
//! and surfaced to the caller before any analysis runs. Per-occurrence
//! anomalies during scanning are recovered locally and never raised here.

use std::path::PathBuf;
use thiserror::Error;

/// The dictionary source is missing required fields or unparsable.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("failed to read bias terms from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed bias terms source: {0}")]
    Csv(#[from] csv::Error),

    #[error("bias terms source has no `{0}` column")]
    MissingColumn(&'static str),

    #[error("row {row}: required field `{field}` is empty")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: unknown severity `{value}` (expected low, medium, high, or critical)")]
    InvalidSeverity { row: usize, value: String },

    #[error("bias terms source contains no terms")]
    Empty,
}

/// The settings file could not be read or parsed.
///
/// A missing individual setting is never an error; lookups fall back to
/// documented defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

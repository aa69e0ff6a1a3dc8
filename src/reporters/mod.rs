//! Output reporters for analysis results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with ANSI colors
//! - `json` - Machine-readable JSON with a metadata envelope
//! - `csv` - One row per analysed input, for batch processing
//! - `markdown` - GitHub-flavored Markdown

mod csv;
mod json;
mod markdown;
mod text;

use crate::models::AnalysisResult;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render one analysis result in the given format.
pub fn render(result: &AnalysisResult, format: OutputFormat, colored: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(result, colored)),
        OutputFormat::Json => json::render(result),
        OutputFormat::Csv => csv::render(&[("input".to_string(), result.clone())]),
        OutputFormat::Markdown => Ok(markdown::render(result)),
    }
}

/// Render a batch of named results in the given format.
///
/// Text and markdown concatenate per-input reports; JSON emits an array with
/// a `filename` field per entry; CSV emits one row per input.
pub fn render_batch(
    results: &[(String, AnalysisResult)],
    format: OutputFormat,
    colored: bool,
) -> Result<String> {
    if results.len() == 1 && format != OutputFormat::Csv {
        return render(&results[0].1, format, colored);
    }
    match format {
        OutputFormat::Text => Ok(results
            .iter()
            .map(|(name, result)| format!("=== {name} ===\n{}", text::render(result, colored)))
            .collect::<Vec<_>>()
            .join("\n\n")),
        OutputFormat::Json => json::render_batch(results),
        OutputFormat::Csv => csv::render(results),
        OutputFormat::Markdown => Ok(results
            .iter()
            .map(|(name, result)| format!("# Analysis: {name}\n\n{}", markdown::render(result)))
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")),
    }
}

/// Recommended file extension for a format.
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Markdown => "md",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::analyser::Analyser;
    use crate::models::{Category, FlaggedTerm, Severity};

    /// A small but fully populated result for reporter tests.
    pub(crate) fn sample_result() -> AnalysisResult {
        let terms = vec![
            FlaggedTerm {
                term: "rockstar".to_string(),
                category: Category::GenderCoded,
                severity: Severity::High,
                suggestion: "skilled professional".to_string(),
                explanation: "Masculine-coded hype term".to_string(),
                context_exceptions: Vec::new(),
            },
            FlaggedTerm {
                term: "young and energetic".to_string(),
                category: Category::Ageist,
                severity: Severity::Critical,
                suggestion: "enthusiastic".to_string(),
                explanation: "Excludes older candidates".to_string(),
                context_exceptions: Vec::new(),
            },
        ];
        Analyser::from_terms(terms).evaluate(
            "We need a rockstar developer for our young and energetic team. \
             We are an equal opportunity employer.",
        )
    }

    #[test]
    fn format_parses_aliases() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn render_dispatches_all_formats() {
        let result = sample_result();
        for format in [
            OutputFormat::Text,
            OutputFormat::Json,
            OutputFormat::Csv,
            OutputFormat::Markdown,
        ] {
            let out = render(&result, format, false).expect("render");
            assert!(!out.is_empty(), "{format} output should not be empty");
        }
    }

    #[test]
    fn batch_text_prefixes_input_names() {
        let results = vec![
            ("a.txt".to_string(), sample_result()),
            ("b.txt".to_string(), sample_result()),
        ];
        let out = render_batch(&results, OutputFormat::Text, false).expect("render");
        assert!(out.contains("=== a.txt ==="));
        assert!(out.contains("=== b.txt ==="));
    }

    #[test]
    fn extensions_match_formats() {
        assert_eq!(file_extension(OutputFormat::Csv), "csv");
        assert_eq!(file_extension(OutputFormat::Markdown), "md");
    }
}

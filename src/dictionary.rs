//! Bias term dictionary loading
//!
//! Terms come from a CSV source with a header row and the columns
//! `term, category, severity, suggestion, explanation, context_exceptions`
//! (the last two optional). Context exceptions are pipe-separated phrases.
//!
//! The loader validates required fields up front and caches the parsed list,
//! so repeated `load()` calls on the same instance never re-read the source.
//! Source order is preserved exactly: matching precedence depends on it.

use crate::error::DataFormatError;
use crate::models::{Category, DictionaryStats, FlaggedTerm, Severity};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Built-in dictionary shipped with the crate.
const DEFAULT_TERMS_CSV: &str = include_str!("../data/bias_terms.csv");

enum TermSource {
    Builtin,
    File(PathBuf),
}

/// Loads and caches a flagged-term dictionary.
pub struct TermLoader {
    source: TermSource,
    cache: OnceLock<Vec<FlaggedTerm>>,
}

impl TermLoader {
    /// Loader for the dictionary bundled with the crate.
    pub fn builtin() -> Self {
        Self {
            source: TermSource::Builtin,
            cache: OnceLock::new(),
        }
    }

    /// Loader for a custom CSV file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: TermSource::File(path.into()),
            cache: OnceLock::new(),
        }
    }

    /// Load the dictionary, reading the source at most once per loader.
    pub fn load(&self) -> Result<&[FlaggedTerm], DataFormatError> {
        if let Some(terms) = self.cache.get() {
            return Ok(terms);
        }
        let terms = match &self.source {
            TermSource::Builtin => parse_terms(DEFAULT_TERMS_CSV.as_bytes())?,
            TermSource::File(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|source| DataFormatError::Io {
                        path: path.clone(),
                        source,
                    })?;
                parse_terms(content.as_bytes())?
            }
        };
        debug!(terms = terms.len(), "loaded bias term dictionary");
        Ok(self.cache.get_or_init(|| terms))
    }

    /// All terms in a given category, in source order.
    pub fn terms_by_category(
        &self,
        category: &Category,
    ) -> Result<Vec<&FlaggedTerm>, DataFormatError> {
        Ok(self
            .load()?
            .iter()
            .filter(|t| &t.category == category)
            .collect())
    }

    /// All terms of a given severity, in source order.
    pub fn terms_by_severity(
        &self,
        severity: Severity,
    ) -> Result<Vec<&FlaggedTerm>, DataFormatError> {
        Ok(self
            .load()?
            .iter()
            .filter(|t| t.severity == severity)
            .collect())
    }

    /// Term counts by category and severity.
    pub fn stats(&self) -> Result<DictionaryStats, DataFormatError> {
        let terms = self.load()?;
        let mut by_category: IndexMap<Category, usize> = IndexMap::new();
        let mut by_severity: IndexMap<Severity, usize> = IndexMap::new();
        for term in terms {
            *by_category.entry(term.category.clone()).or_insert(0) += 1;
            *by_severity.entry(term.severity).or_insert(0) += 1;
        }
        Ok(DictionaryStats {
            total_terms: terms.len(),
            by_category,
            by_severity,
        })
    }
}

/// Parse a CSV dictionary from any reader. Rows keep source order.
pub fn parse_terms<R: Read>(reader: R) -> Result<Vec<FlaggedTerm>, DataFormatError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |name: &'static str| -> Result<usize, DataFormatError> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or(DataFormatError::MissingColumn(name))
    };
    let term_col = column("term")?;
    let category_col = column("category")?;
    let severity_col = column("severity")?;
    let suggestion_col = column("suggestion")?;
    let explanation_col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("explanation"));
    let exceptions_col = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("context_exceptions"));

    let mut terms = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Header is line 1; data rows start at line 2.
        let row = index + 2;

        let field = |col: usize, name: &'static str| -> Result<String, DataFormatError> {
            let value = record.get(col).unwrap_or("").trim();
            if value.is_empty() {
                Err(DataFormatError::MissingField { row, field: name })
            } else {
                Ok(value.to_string())
            }
        };

        let term = field(term_col, "term")?.to_lowercase();
        let category = Category::from(field(category_col, "category")?.as_str());
        let severity: Severity = field(severity_col, "severity")?
            .parse()
            .map_err(|value| DataFormatError::InvalidSeverity { row, value })?;
        let suggestion = field(suggestion_col, "suggestion")?;
        let explanation = explanation_col
            .and_then(|col| record.get(col))
            .unwrap_or("")
            .trim()
            .to_string();
        let context_exceptions = exceptions_col
            .and_then(|col| record.get(col))
            .unwrap_or("")
            .split('|')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(String::from)
            .collect();

        // First entry per unique term wins at match time; later duplicates are
        // unreachable. Kept in the list to preserve source order, but flagged
        // so dictionary authors can see the shadowing.
        if !seen.insert(term.clone()) {
            warn!(term = %term, row, "duplicate dictionary term; first entry takes precedence");
        }

        terms.push(FlaggedTerm {
            term,
            category,
            severity,
            suggestion,
            explanation,
            context_exceptions,
        });
    }

    if terms.is_empty() {
        return Err(DataFormatError::Empty);
    }

    Ok(terms)
}

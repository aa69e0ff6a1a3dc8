//! Core data models for biaslint
//!
//! These models are used throughout the codebase for representing
//! dictionary terms, matches, and analysis results.

use serde::{Deserialize, Serialize, Serializer};

/// Severity levels for flagged terms, ordered from least to most serious.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, most serious first. Used for report grouping.
    pub const DESCENDING: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(other.to_string()),
        }
    }
}

/// Bias categories. The named variants carry dedicated scoring weights;
/// anything else in a dictionary source is preserved as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    GenderCoded,
    Ageist,
    Ableist,
    CultureFit,
    Socioeconomic,
    Racial,
    Other(String),
}

impl Category {
    /// Canonical kebab-case name as it appears in dictionary sources.
    pub fn as_str(&self) -> &str {
        match self {
            Category::GenderCoded => "gender-coded",
            Category::Ageist => "ageist",
            Category::Ableist => "ableist",
            Category::CultureFit => "culture-fit",
            Category::Socioeconomic => "socioeconomic",
            Category::Racial => "racial",
            Category::Other(name) => name,
        }
    }

    /// Human-friendly name for reports ("gender-coded" -> "Gender Coded").
    pub fn display_name(&self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "gender-coded" => Category::GenderCoded,
            "ageist" => Category::Ageist,
            "ableist" => Category::Ableist,
            "culture-fit" => Category::CultureFit,
            "socioeconomic" => Category::Socioeconomic,
            "racial" => Category::Racial,
            other => Category::Other(other.to_string()),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A potentially biased term from the dictionary.
///
/// Loaded once at startup and treated as immutable; the analyser shares the
/// term list across all analyses.
#[derive(Debug, Clone, Serialize)]
pub struct FlaggedTerm {
    /// Canonical lowercase phrase to match.
    pub term: String,
    pub category: Category,
    pub severity: Severity,
    /// Suggested replacement text.
    pub suggestion: String,
    /// Rationale shown in reports.
    pub explanation: String,
    /// Phrases that suppress a match when present in the same sentence.
    pub context_exceptions: Vec<String>,
}

/// Result of finding a flagged term in text.
///
/// Invariant: `count == positions.len() == contexts.len()` and `count >= 1`.
/// Positions are byte offsets into the lowercased input, ascending.
#[derive(Debug, Clone, Serialize)]
pub struct TermMatch {
    pub term: String,
    pub category: Category,
    pub severity: Severity,
    pub suggestion: String,
    pub explanation: String,
    pub count: usize,
    pub positions: Vec<usize>,
    /// Sentence containing each occurrence, aligned 1:1 with `positions`.
    /// Empty string when the sentence could not be located.
    pub contexts: Vec<String>,
}

/// Score breakdown for a single bias category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    /// 0-100, clamped; lower means more issues.
    pub score: f64,
    /// Sum of match counts within the category.
    pub issues_count: usize,
    /// Highest severity among contributing matches.
    pub max_severity: Severity,
}

/// Four-band letter grade derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Grade {
    /// Band boundaries are inclusive on the lower bound.
    pub fn from_score(score: f64) -> Grade {
        if score >= 90.0 {
            Grade::Excellent
        } else if score >= 75.0 {
            Grade::Good
        } else if score >= 60.0 {
            Grade::Fair
        } else {
            Grade::Poor
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::Excellent => write!(f, "Excellent"),
            Grade::Good => write!(f, "Good"),
            Grade::Fair => write!(f, "Fair"),
            Grade::Poor => write!(f, "Poor"),
        }
    }
}

/// Complete analysis result for one job ad.
///
/// Constructed once per analysis call, immutable afterwards. Consumers
/// (reporters, the CLI) only read from it.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Full input text. Kept for callers; not serialized into reports.
    #[serde(skip_serializing)]
    pub text: String,
    pub overall_score: f64,
    pub grade: Grade,
    pub word_count: usize,
    pub matches: Vec<TermMatch>,
    /// Keyed by category, in order of first appearance among matches.
    pub category_scores: indexmap::IndexMap<Category, CategoryScore>,
    pub recommendations: Vec<String>,
    pub positive_aspects: Vec<String>,
}

impl AnalysisResult {
    /// Total flagged occurrences across all matches.
    pub fn total_issues(&self) -> usize {
        self.matches.iter().map(|m| m.count).sum()
    }
}

/// Statistics about a loaded term dictionary.
#[derive(Debug, Clone, Serialize)]
pub struct DictionaryStats {
    pub total_terms: usize,
    pub by_category: indexmap::IndexMap<Category, usize>,
    pub by_severity: indexmap::IndexMap<Severity, usize>,
}

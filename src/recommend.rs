//! Recommendation engine
//!
//! Turns matches and category scores into prioritized, human-readable
//! guidance, and detects positive inclusive-language indicators.

use crate::config::AnalysisConfig;
use crate::models::{Category, CategoryScore, Severity, TermMatch};
use indexmap::IndexMap;

/// Phrases that signal inclusive intent. Matched case-insensitively as
/// substrings of the whole text; results keep this order.
const DEFAULT_POSITIVE_INDICATORS: &[&str] = &[
    "equal opportunity employer",
    "diverse",
    "diversity",
    "inclusive",
    "accommodations available",
    "flexible working",
    "parental leave",
    "accessibility",
    "underrepresented",
    "all backgrounds",
    "equivalent experience",
];

/// Positive indicators present in the text, in the order they are checked.
pub fn detect_positive_indicators(text: &str, config: &AnalysisConfig) -> Vec<String> {
    let text_lower = text.to_lowercase();
    match &config.positive_indicators {
        Some(custom) => custom
            .iter()
            .filter(|phrase| text_lower.contains(&phrase.to_lowercase()))
            .cloned()
            .collect(),
        None => DEFAULT_POSITIVE_INDICATORS
            .iter()
            .filter(|phrase| text_lower.contains(&phrase.to_lowercase()))
            .map(|phrase| phrase.to_string())
            .collect(),
    }
}

/// Actionable recommendations derived from the analysis.
///
/// Order: severity aggregates first (critical, then high), then up to three
/// category advisories (worst score first), then exactly one closing line
/// whose tone escalates with the total issue count.
pub fn generate_recommendations(
    matches: &[TermMatch],
    category_scores: &IndexMap<Category, CategoryScore>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if matches.is_empty() {
        recommendations.push("✓ No biased language detected - great job!".to_string());
        return recommendations;
    }

    let critical_count: usize = matches
        .iter()
        .filter(|m| m.severity == Severity::Critical)
        .map(|m| m.count)
        .sum();
    if critical_count > 0 {
        recommendations.push(format!(
            "🔴 CRITICAL: Remove {critical_count} critically biased term(s) immediately - \
             these may violate employment law"
        ));
    }

    let high_count: usize = matches
        .iter()
        .filter(|m| m.severity == Severity::High)
        .map(|m| m.count)
        .sum();
    if high_count > 0 {
        recommendations.push(format!(
            "⚠️  HIGH PRIORITY: Replace {high_count} strongly biased term(s) with \
             neutral alternatives"
        ));
    }

    let mut problem_categories: Vec<&CategoryScore> = category_scores
        .values()
        .filter(|score| score.score < 90.0)
        .collect();
    problem_categories.sort_by(|a, b| a.score.total_cmp(&b.score));
    for score in problem_categories.iter().take(3) {
        recommendations.push(format!(
            "📝 Review {} language: {} issue(s) detected",
            score.category.display_name(),
            score.issues_count
        ));
    }

    let total_issues: usize = matches.iter().map(|m| m.count).sum();
    if total_issues <= 3 {
        recommendations
            .push("💡 You're close! Fix these few issues for an excellent score".to_string());
    } else if total_issues <= 7 {
        recommendations
            .push("💡 Consider using more neutral, inclusive language throughout".to_string());
    } else {
        recommendations.push(
            "💡 Significant revision recommended - focus on removing gendered, \
             age-specific, and exclusionary terms"
                .to_string(),
        );
    }

    recommendations
}

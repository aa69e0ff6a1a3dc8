//! Markdown reporter
//!
//! GitHub-flavored Markdown suitable for pull request comments or docs.

use crate::models::{AnalysisResult, Severity};

/// Render one result as a Markdown report.
pub fn render(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("# Inclusive Job Ad Analysis Report\n\n");
    out.push_str(&format!(
        "**Overall Score:** {}/100 ({})\n\n",
        result.overall_score, result.grade
    ));
    out.push_str(&format!("**Word Count:** {}\n\n", result.word_count));
    out.push_str(&format!("**Issues Found:** {}\n\n", result.matches.len()));

    if !result.category_scores.is_empty() {
        out.push_str("## Category Breakdown\n\n");
        out.push_str("| Category | Score | Issues | Max Severity |\n");
        out.push_str("|----------|-------|--------|--------------|\n");

        let mut scores: Vec<_> = result.category_scores.values().collect();
        scores.sort_by(|a, b| a.score.total_cmp(&b.score));
        for score in scores {
            out.push_str(&format!(
                "| {} | {}/100 | {} | {} |\n",
                score.category.display_name(),
                score.score,
                score.issues_count,
                score.max_severity
            ));
        }
        out.push('\n');
    }

    if !result.matches.is_empty() {
        out.push_str("## Issues Detected\n\n");

        for severity in Severity::DESCENDING {
            let matches: Vec<_> = result
                .matches
                .iter()
                .filter(|m| m.severity == severity)
                .collect();
            if matches.is_empty() {
                continue;
            }

            out.push_str(&format!(
                "### {} Severity\n\n",
                severity.to_string().to_uppercase()
            ));
            for m in matches {
                out.push_str(&format!(
                    "**{}** ({}, found {}x)\n",
                    m.term, m.category, m.count
                ));
                out.push_str(&format!("- Issue: {}\n", m.explanation));
                out.push_str(&format!("- Suggestion: {}\n", m.suggestion));
                if let Some(context) = m.contexts.first().filter(|c| !c.is_empty()) {
                    let truncated: String = context.chars().take(100).collect();
                    out.push_str(&format!("- Context: \"{truncated}\"\n"));
                }
                out.push('\n');
            }
        }
    }

    if !result.recommendations.is_empty() {
        out.push_str("## Recommendations\n\n");
        for rec in &result.recommendations {
            out.push_str(&format!("- {rec}\n"));
        }
        out.push('\n');
    }

    if !result.positive_aspects.is_empty() {
        out.push_str("## Positive Aspects\n\n");
        for aspect in &result.positive_aspects {
            out.push_str(&format!("- ✓ Contains '{aspect}'\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "\n---\n*Report generated: {}*\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    out
}

//! Text (terminal) reporter with colors and formatting

use crate::models::{AnalysisResult, Grade, Severity};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

fn grade_color(grade: Grade) -> &'static str {
    match grade {
        Grade::Excellent => GREEN,
        Grade::Good => CYAN,
        Grade::Fair => YELLOW,
        Grade::Poor => RED,
    }
}

fn grade_emoji(grade: Grade) -> &'static str {
    match grade {
        Grade::Excellent => "🎉",
        Grade::Good => "✓",
        Grade::Fair => "⚠️",
        Grade::Poor => "❌",
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => RED,
        Severity::Medium => YELLOW,
        Severity::Low => CYAN,
    }
}

fn category_color(score: f64) -> &'static str {
    if score >= 80.0 {
        GREEN
    } else if score >= 60.0 {
        YELLOW
    } else {
        RED
    }
}

/// Render a formatted terminal report. With `colored` off, every ANSI escape
/// is omitted so the output is safe for files and pipes.
pub fn render(result: &AnalysisResult, colored: bool) -> String {
    // Closures keep the body readable; they collapse to no-ops uncolored.
    let paint = |code: &'static str| if colored { code } else { "" };
    let mut out = String::new();

    out.push_str(&format!("\n{}{}\n", paint(BOLD), "=".repeat(60)));
    out.push_str("INCLUSIVE JOB AD ANALYSIS REPORT\n");
    out.push_str(&format!("{}{}\n\n", "=".repeat(60), paint(RESET)));

    out.push_str(&format!(
        "{}Overall Score: {}{}/100{} ({}) {}\n",
        paint(BOLD),
        paint(grade_color(result.grade)),
        result.overall_score,
        paint(RESET),
        result.grade,
        grade_emoji(result.grade)
    ));
    out.push_str(&format!("Word Count: {}\n", result.word_count));
    out.push_str(&format!("Issues Found: {}\n\n", result.matches.len()));

    if !result.category_scores.is_empty() {
        out.push_str(&format!("{}CATEGORY BREAKDOWN:{}\n", paint(BOLD), paint(RESET)));
        out.push_str(&format!("{}\n", "-".repeat(60)));

        let mut scores: Vec<_> = result.category_scores.values().collect();
        scores.sort_by(|a, b| a.score.total_cmp(&b.score));
        for score in scores {
            out.push_str(&format!(
                "{:<20} {}{:>5.1}/100{}  ({} issue(s), max: {})\n",
                score.category.display_name(),
                paint(category_color(score.score)),
                score.score,
                paint(RESET),
                score.issues_count,
                score.max_severity
            ));
        }
        out.push('\n');
    }

    if !result.matches.is_empty() {
        out.push_str(&format!("{}ISSUES DETECTED:{}\n", paint(BOLD), paint(RESET)));
        out.push_str(&format!("{}\n", "-".repeat(60)));

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
                "\n{}{}{} SEVERITY:{}\n",
                paint(BOLD),
                paint(severity_color(severity)),
                severity.to_string().to_uppercase(),
                paint(RESET)
            ));

            for (i, m) in matches.iter().enumerate() {
                out.push_str(&format!(
                    "\n{}. '{}' [{}] (found {}x)\n",
                    i + 1,
                    m.term,
                    m.category,
                    m.count
                ));
                out.push_str(&format!("   Issue: {}\n", m.explanation));
                out.push_str(&format!(
                    "   Suggestion: {}{}{}\n",
                    paint(GREEN),
                    m.suggestion,
                    paint(RESET)
                ));
                if let Some(context) = m.contexts.first().filter(|c| !c.is_empty()) {
                    let truncated: String = context.chars().take(100).collect();
                    let ellipsis = if context.chars().count() > 100 { "..." } else { "" };
                    out.push_str(&format!("   Context: \"{truncated}{ellipsis}\"\n"));
                }
            }
        }
        out.push('\n');
    }

    if !result.recommendations.is_empty() {
        out.push_str(&format!("\n{}RECOMMENDATIONS:{}\n", paint(BOLD), paint(RESET)));
        out.push_str(&format!("{}\n", "-".repeat(60)));
        for rec in &result.recommendations {
            out.push_str(&format!("{rec}\n"));
        }
        out.push('\n');
    }

    if !result.positive_aspects.is_empty() {
        out.push_str(&format!(
            "\n{}{}POSITIVE ASPECTS:{}\n",
            paint(BOLD),
            paint(GREEN),
            paint(RESET)
        ));
        out.push_str(&format!("{}\n", "-".repeat(60)));
        for aspect in &result.positive_aspects {
            out.push_str(&format!("✓ Contains '{aspect}'\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!("{}\n", "-".repeat(60)));
    out.push_str(&format!(
        "{}Report generated: {}{}\n",
        paint(DIM),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        paint(RESET)
    ));

    out
}

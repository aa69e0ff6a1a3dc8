//! CSV reporter
//!
//! One row per analysed input, for spreadsheet-friendly batch processing.
//! Columns: filename, overall score, grade, word count, total issues, then a
//! score/issues pair per category seen across the batch (first-appearance
//! order), then occurrence counts per severity.

use crate::models::{AnalysisResult, Category, Severity};
use anyhow::Result;

/// Render a batch of named results as CSV with a header row.
pub fn render(results: &[(String, AnalysisResult)]) -> Result<String> {
    // Union of categories across the batch, keeping first-appearance order so
    // every row shares one column layout.
    let mut categories: Vec<Category> = Vec::new();
    for (_, result) in results {
        for category in result.category_scores.keys() {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec![
        "filename".to_string(),
        "overall_score".to_string(),
        "grade".to_string(),
        "word_count".to_string(),
        "total_issues".to_string(),
    ];
    for category in &categories {
        header.push(format!("{category}_score"));
        header.push(format!("{category}_issues"));
    }
    for severity in [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ] {
        header.push(format!("{severity}_count"));
    }
    writer.write_record(&header)?;

    for (name, result) in results {
        let mut row = vec![
            name.clone(),
            result.overall_score.to_string(),
            result.grade.to_string(),
            result.word_count.to_string(),
            result.total_issues().to_string(),
        ];
        for category in &categories {
            match result.category_scores.get(category) {
                Some(score) => {
                    row.push(score.score.to_string());
                    row.push(score.issues_count.to_string());
                }
                None => {
                    row.push(String::new());
                    row.push(String::new());
                }
            }
        }
        for severity in [
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
        ] {
            let count: usize = result
                .matches
                .iter()
                .filter(|m| m.severity == severity)
                .map(|m| m.count)
                .sum();
            row.push(count.to_string());
        }
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV writer: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}

//! Bias scoring
//!
//! Converts matches into an overall 0-100 score, per-category sub-scores, and
//! a grade band. The formulas and constants are load-bearing for score
//! compatibility across versions:
//!
//! ```text
//! category penalty = min(50, raw * 10)        raw = Σ count × severity_weight
//! overall penalty  = Σ count × base × category_weight × severity_weight
//!                    / length_factor           length_factor ∈ [0.5, 2.0]
//! scaled penalty   = min(100, 20 · ln(penalty + 1))
//! score            = max(0, 100 − scaled penalty), one decimal
//! ```
//!
//! The logarithmic compression keeps scores bounded: a handful of repeated
//! critical terms lowers the score steeply at first, then ever more slowly,
//! while remaining monotonically decreasing in total penalty.
//!
//! Every weight lookup falls back to a documented default when the setting is
//! absent; a missing configuration key is never an error.

use crate::config::AnalysisConfig;
use crate::models::{Category, CategoryScore, Severity, TermMatch};
use indexmap::IndexMap;

/// Penalty multiplier for a severity level.
pub fn severity_weight(severity: Severity, config: &AnalysisConfig) -> f64 {
    let overrides = &config.severity_multipliers;
    match severity {
        Severity::Critical => overrides.critical.unwrap_or(2.0),
        Severity::High => overrides.high.unwrap_or(1.5),
        Severity::Medium => overrides.medium.unwrap_or(1.0),
        Severity::Low => overrides.low.unwrap_or(0.5),
    }
}

/// Penalty weight for a bias category. Categories outside the built-in set
/// fall back to 0.10 unless the settings file names them.
pub fn category_weight(category: &Category, config: &AnalysisConfig) -> f64 {
    let weights = &config.category_weights;
    match category {
        Category::GenderCoded => weights.gender_coded.unwrap_or(0.25),
        Category::Ageist => weights.ageist.unwrap_or(0.25),
        Category::Ableist => weights.ableist.unwrap_or(0.25),
        Category::CultureFit => weights.culture_fit.unwrap_or(0.15),
        Category::Socioeconomic => weights.socioeconomic.unwrap_or(0.05),
        Category::Racial => weights.racial.unwrap_or(0.05),
        Category::Other(name) => weights.extra.get(name).copied().unwrap_or(0.10),
    }
}

/// Per-category score breakdown, keyed in order of first appearance.
pub fn compute_category_scores(
    matches: &[TermMatch],
    config: &AnalysisConfig,
) -> IndexMap<Category, CategoryScore> {
    struct Accumulator {
        issues: usize,
        raw: f64,
        max_severity: Severity,
    }

    let mut accumulators: IndexMap<Category, Accumulator> = IndexMap::new();
    for m in matches {
        let acc = accumulators
            .entry(m.category.clone())
            .or_insert(Accumulator {
                issues: 0,
                raw: 0.0,
                max_severity: Severity::Low,
            });
        acc.issues += m.count;
        acc.raw += m.count as f64 * severity_weight(m.severity, config);
        if m.severity > acc.max_severity {
            acc.max_severity = m.severity;
        }
    }

    accumulators
        .into_iter()
        .map(|(category, acc)| {
            let penalty = (acc.raw * 10.0).min(50.0);
            let score = (100.0 - penalty).max(0.0);
            let score = CategoryScore {
                category: category.clone(),
                score: round1(score),
                issues_count: acc.issues,
                max_severity: acc.max_severity,
            };
            (category, score)
        })
        .collect()
}

/// Overall bias score, 0-100 (100 = no bias detected).
pub fn compute_bias_score(matches: &[TermMatch], text: &str, config: &AnalysisConfig) -> f64 {
    if matches.is_empty() {
        return 100.0;
    }

    let word_count = text.split_whitespace().count().max(1) as f64;
    let norm_factor = config.scoring.normalization_factor.unwrap_or(100.0);
    let base_points = config.scoring.base_points_per_issue.unwrap_or(10.0);

    let mut total_penalty: f64 = matches
        .iter()
        .map(|m| {
            m.count as f64
                * base_points
                * category_weight(&m.category, config)
                * severity_weight(m.severity, config)
        })
        .sum();

    if config.scoring.length_normalization.unwrap_or(true) {
        let length_factor = (word_count / norm_factor).clamp(0.5, 2.0);
        total_penalty /= length_factor;
    }

    let scaled_penalty = if total_penalty > 0.0 {
        (20.0 * (total_penalty + 1.0).ln()).min(100.0)
    } else {
        0.0
    };

    round1((100.0 - scaled_penalty).max(0.0))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

//! Dictionary-driven bias term matcher
//!
//! `Analyser` is an explicitly constructed, immutable service: the term list,
//! sentence splitter, and settings are fixed at construction, and every
//! `analyse`/`evaluate` call is a pure function of that state plus the input
//! text. Instances can be shared freely across threads; independent instances
//! with different dictionaries can coexist.
//!
//! Matching rules:
//! - case-insensitive, word-boundary-safe, against the lowercased text;
//! - dictionary order decides both precedence (first entry per unique term
//!   wins) and result order;
//! - an occurrence whose sentence contains one of the term's context
//!   exceptions is discarded;
//! - terms with zero surviving occurrences produce no match at all.

use crate::config::AnalysisConfig;
use crate::dictionary::TermLoader;
use crate::error::DataFormatError;
use crate::models::{AnalysisResult, FlaggedTerm, Grade, TermMatch};
use crate::recommend;
use crate::scoring;
use crate::sentences::{AbbreviationSplitter, SentenceSplitter};
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

struct CompiledTerm {
    term: FlaggedTerm,
    /// Word-boundary pattern for the canonical lowercase term.
    pattern: Regex,
}

/// Immutable analysis service: dictionary + sentence splitter + settings.
pub struct Analyser {
    terms: Vec<CompiledTerm>,
    splitter: Box<dyn SentenceSplitter>,
    config: AnalysisConfig,
}

impl Analyser {
    /// Analyser over the built-in dictionary with default settings.
    pub fn new() -> Result<Self, DataFormatError> {
        Self::from_loader(&TermLoader::builtin())
    }

    /// Analyser over a dictionary loader's terms.
    pub fn from_loader(loader: &TermLoader) -> Result<Self, DataFormatError> {
        Ok(Self::from_terms(loader.load()?.to_vec()))
    }

    /// Analyser over an explicit term list (kept in the given order).
    pub fn from_terms(terms: Vec<FlaggedTerm>) -> Self {
        let compiled = terms
            .into_iter()
            .map(|term| {
                let canonical = term.term.to_lowercase();
                let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&canonical)))
                    .expect("escaped term yields a valid pattern");
                CompiledTerm { term, pattern }
            })
            .collect();
        Self {
            terms: compiled,
            splitter: Box::new(AbbreviationSplitter),
            config: AnalysisConfig::default(),
        }
    }

    /// Replace the sentence splitting strategy.
    pub fn with_splitter(mut self, splitter: Box<dyn SentenceSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    /// Replace the analysis settings.
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of loaded dictionary terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Scan text for flagged terms.
    ///
    /// Returns one `TermMatch` per dictionary term with at least one
    /// occurrence surviving exception filtering, in dictionary order.
    /// Empty or whitespace-only text yields an empty list.
    pub fn analyse(&self, text: &str) -> Vec<TermMatch> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let lower_text = text.to_lowercase();
        let sentences = self.splitter.split(text);
        let mut seen: HashSet<String> = HashSet::new();
        let mut results = Vec::new();

        for compiled in &self.terms {
            let term = &compiled.term;
            let key = term.term.to_lowercase();
            if seen.contains(&key) {
                continue;
            }

            let mut positions = Vec::new();
            let mut contexts = Vec::new();

            for m in compiled.pattern.find_iter(&lower_text) {
                let context = find_sentence_for_offset(&sentences, text, m.start());
                if is_exception_context(term, context) {
                    continue;
                }
                positions.push(m.start());
                contexts.push(context.to_string());
            }

            if !positions.is_empty() {
                seen.insert(key);
                results.push(TermMatch {
                    term: term.term.clone(),
                    category: term.category.clone(),
                    severity: term.severity,
                    suggestion: term.suggestion.clone(),
                    explanation: term.explanation.clone(),
                    count: positions.len(),
                    positions,
                    contexts,
                });
            }
        }

        debug!(matches = results.len(), "analysed text");
        results
    }

    /// Run the full pipeline: matches, scores, grade, recommendations, and
    /// positive indicators, assembled into one `AnalysisResult`.
    pub fn evaluate(&self, text: &str) -> AnalysisResult {
        let matches = self.analyse(text);
        let overall_score = scoring::compute_bias_score(&matches, text, &self.config);
        let grade = Grade::from_score(overall_score);
        let category_scores = scoring::compute_category_scores(&matches, &self.config);
        let positive_aspects = recommend::detect_positive_indicators(text, &self.config);
        let recommendations = recommend::generate_recommendations(&matches, &category_scores);
        let word_count = text.split_whitespace().count();

        AnalysisResult {
            text: text.to_string(),
            overall_score,
            grade,
            word_count,
            matches,
            category_scores,
            recommendations,
            positive_aspects,
        }
    }
}

/// Find the sentence whose span contains `offset`, scanning forward with a
/// monotonically advancing cursor. A sentence that cannot be re-located in
/// the source (whitespace normalization, boundary ambiguity) is skipped with
/// a length-based cursor advance; if no sentence contains the offset the
/// context is the empty string, never an error.
fn find_sentence_for_offset<'a>(sentences: &'a [String], original: &str, offset: usize) -> &'a str {
    let mut running = 0;
    for sentence in sentences {
        let found = original
            .get(running..)
            .and_then(|rest| rest.find(sentence.as_str()));
        match found {
            Some(rel) => {
                let start = running + rel;
                let end = start + sentence.len();
                if start <= offset && offset <= end {
                    return sentence;
                }
                running = end;
            }
            None => {
                running += sentence.len() + 1;
            }
        }
    }
    ""
}

/// True when one of the term's exception phrases appears (case-insensitive)
/// in the occurrence's sentence.
fn is_exception_context(term: &FlaggedTerm, context: &str) -> bool {
    if term.context_exceptions.is_empty() {
        return false;
    }
    let context_lower = context.to_lowercase();
    term.context_exceptions
        .iter()
        .any(|exception| context_lower.contains(&exception.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Severity};
    use crate::sentences::PunctuationSplitter;

    fn term(name: &str, category: Category, severity: Severity) -> FlaggedTerm {
        FlaggedTerm {
            term: name.to_string(),
            category,
            severity,
            suggestion: "something neutral".to_string(),
            explanation: "test term".to_string(),
            context_exceptions: Vec::new(),
        }
    }

    fn term_with_exceptions(
        name: &str,
        category: Category,
        severity: Severity,
        exceptions: &[&str],
    ) -> FlaggedTerm {
        FlaggedTerm {
            context_exceptions: exceptions.iter().map(|e| e.to_string()).collect(),
            ..term(name, category, severity)
        }
    }

    fn rockstar_analyser() -> Analyser {
        Analyser::from_terms(vec![term(
            "rockstar",
            Category::GenderCoded,
            Severity::High,
        )])
    }

    #[test]
    fn empty_and_whitespace_text_yield_no_matches() {
        let analyser = rockstar_analyser();
        assert!(analyser.analyse("").is_empty());
        assert!(analyser.analyse("   \n\t ").is_empty());
    }

    #[test]
    fn detects_single_term_with_position() {
        let analyser = rockstar_analyser();
        let matches = analyser.analyse("We need a rockstar developer.");
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.term, "rockstar");
        assert_eq!(m.count, 1);
        assert_eq!(m.positions, vec![10]);
        assert_eq!(m.contexts, vec!["We need a rockstar developer.".to_string()]);
    }

    #[test]
    fn counts_positions_and_contexts_stay_aligned() {
        let analyser = rockstar_analyser();
        let matches = analyser.analyse("We need a rockstar developer. Be a rockstar!");
        let m = &matches[0];
        assert_eq!(m.count, 2);
        assert_eq!(m.positions.len(), m.count);
        assert_eq!(m.contexts.len(), m.count);
        assert!(m.positions[0] < m.positions[1]);
        assert!(m.contexts[1].to_lowercase().contains("rockstar"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let analyser = rockstar_analyser();
        let matches = analyser.analyse("We need a ROCKSTAR Developer.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "rockstar");
    }

    #[test]
    fn word_boundaries_are_respected() {
        let analyser = rockstar_analyser();
        assert!(analyser.analyse("We admire rockstars here.").is_empty());
        assert!(analyser.analyse("A rocketstar joined.").is_empty());
    }

    #[test]
    fn exception_phrase_suppresses_occurrence() {
        let analyser = Analyser::from_terms(vec![term_with_exceptions(
            "competitive",
            Category::GenderCoded,
            Severity::Medium,
            &["competitive salary"],
        )]);
        assert!(analyser
            .analyse("We offer a competitive salary and benefits.")
            .is_empty());

        let matches = analyser.analyse("We need a competitive person to join our team.");
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn exception_applies_per_sentence() {
        let analyser = Analyser::from_terms(vec![term_with_exceptions(
            "competitive",
            Category::GenderCoded,
            Severity::Medium,
            &["competitive salary"],
        )]);
        let text = "We are a competitive bunch. We offer a competitive salary.";
        let matches = analyser.analyse(text);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.count, 1);
        assert!(m.contexts[0].contains("competitive bunch"));
    }

    #[test]
    fn first_dictionary_entry_per_term_wins() {
        let analyser = Analyser::from_terms(vec![
            term("rockstar", Category::GenderCoded, Severity::High),
            term("rockstar", Category::CultureFit, Severity::Low),
        ]);
        let matches = analyser.analyse("Be a rockstar.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, Category::GenderCoded);
        assert_eq!(matches[0].severity, Severity::High);
    }

    #[test]
    fn result_order_follows_dictionary_order() {
        let analyser = Analyser::from_terms(vec![
            term("ninja", Category::GenderCoded, Severity::High),
            term("rockstar", Category::GenderCoded, Severity::High),
        ]);
        // Text order is reversed relative to dictionary order.
        let matches = analyser.analyse("A rockstar and a ninja walk in.");
        let terms: Vec<&str> = matches.iter().map(|m| m.term.as_str()).collect();
        assert_eq!(terms, vec!["ninja", "rockstar"]);
    }

    #[test]
    fn analyse_is_idempotent() {
        let analyser = rockstar_analyser();
        let text = "We need a rockstar developer. Be a rockstar!";
        let first = analyser.analyse(text);
        let second = analyser.analyse(text);
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].positions, second[0].positions);
        assert_eq!(first[0].contexts, second[0].contexts);
    }

    #[test]
    fn phrase_terms_match_across_words() {
        let analyser = Analyser::from_terms(vec![term(
            "young and energetic",
            Category::Ageist,
            Severity::Critical,
        )]);
        let matches = analyser.analyse("Looking for a young and energetic hire.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].positions, vec![14]);
    }

    /// Splitter that rewrites sentences so they cannot be found again in the
    /// source text, forcing the sentence-locate miss path.
    struct ManglingSplitter;

    impl SentenceSplitter for ManglingSplitter {
        fn split(&self, text: &str) -> Vec<String> {
            PunctuationSplitter
                .split(text)
                .into_iter()
                .map(|s| s.replace(' ', "  "))
                .collect()
        }
    }

    #[test]
    fn sentence_locate_miss_yields_empty_context() {
        let analyser = rockstar_analyser().with_splitter(Box::new(ManglingSplitter));
        let matches = analyser.analyse("We need a rockstar developer.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].count, 1);
        assert_eq!(matches[0].contexts, vec![String::new()]);
    }

    #[test]
    fn evaluate_assembles_full_result() {
        let analyser = rockstar_analyser();
        let result = analyser.evaluate("We need a rockstar developer.");
        assert_eq!(result.word_count, 5);
        assert_eq!(result.matches.len(), 1);
        assert!(result.overall_score < 100.0);
        assert!(!result.recommendations.is_empty());
        assert!(result.category_scores.contains_key(&Category::GenderCoded));
    }

    #[test]
    fn evaluate_on_clean_text_scores_perfect() {
        let analyser = rockstar_analyser();
        let result = analyser.evaluate("We welcome applicants of all backgrounds.");
        assert_eq!(result.overall_score, 100.0);
        assert_eq!(result.grade, Grade::Excellent);
        assert!(result.matches.is_empty());
        assert!(result.category_scores.is_empty());
    }
}

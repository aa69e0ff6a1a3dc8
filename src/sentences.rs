//! Sentence splitting strategies
//!
//! The matcher captures the sentence surrounding each occurrence, so it needs
//! text split into contiguous, trimmed sentences that can be re-located in the
//! original via substring search. Two strategies are provided:
//!
//! - [`PunctuationSplitter`]: terminal punctuation (`.`, `!`, `?`) followed by
//!   whitespace is a boundary. Cheap and predictable.
//! - [`AbbreviationSplitter`]: the same scan, but refuses to break after
//!   common abbreviations ("e.g.", "Dr.") and single-letter initials.
//!
//! The analyser depends only on the trait and picks an implementation at
//! construction time.

use regex::Regex;
use std::sync::OnceLock;

static BOUNDARY_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Terminal punctuation run followed by whitespace.
fn boundary_pattern() -> &'static Regex {
    BOUNDARY_PATTERN.get_or_init(|| Regex::new(r"[.!?]+\s+").expect("valid regex"))
}

/// Abbreviations that end in a period but do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "etc.", "vs.", "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "inc.",
    "ltd.", "co.", "dept.", "approx.", "no.", "st.",
];

/// Splits text into trimmed sentences.
///
/// Implementations must return sentences in text order, each of which appears
/// verbatim in the input (so a forward substring search can locate it).
pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

/// Boundary at every terminal punctuation run followed by whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct PunctuationSplitter;

impl SentenceSplitter for PunctuationSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        split_with(text, |_, _| true)
    }
}

/// Like [`PunctuationSplitter`], but keeps abbreviations and initials attached
/// to the sentence they belong to.
#[derive(Debug, Default, Clone, Copy)]
pub struct AbbreviationSplitter;

impl SentenceSplitter for AbbreviationSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        split_with(text, |text, punct_end| {
            let last_token = match text[..punct_end].split_whitespace().last() {
                Some(token) => token,
                None => return true,
            };
            // '!' and '?' always terminate; only '.' can belong to a token.
            if !last_token.ends_with('.') {
                return true;
            }
            let lowered = last_token.to_lowercase();
            if ABBREVIATIONS.contains(&lowered.as_str()) {
                return false;
            }
            // Single-letter initials such as "J." in names.
            let mut chars = last_token.chars();
            if let (Some(first), Some('.'), None) = (chars.next(), chars.next(), chars.next()) {
                if first.is_alphabetic() {
                    return false;
                }
            }
            true
        })
    }
}

/// Shared boundary scan. `accept(text, punct_end)` decides whether a candidate
/// boundary (punctuation ending at byte `punct_end`) really ends a sentence.
fn split_with(text: &str, accept: impl Fn(&str, usize) -> bool) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in boundary_pattern().find_iter(text) {
        let punct_len = m.as_str().trim_end().len();
        let punct_end = m.start() + punct_len;
        if !accept(text, punct_end) {
            continue;
        }
        let sentence = text[start..punct_end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        start = m.end();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let text = "We need a developer. Apply today! Any questions?";
        let sentences = PunctuationSplitter.split(text);
        assert_eq!(
            sentences,
            vec!["We need a developer.", "Apply today!", "Any questions?"]
        );
    }

    #[test]
    fn keeps_punctuation_run_with_sentence() {
        let sentences = PunctuationSplitter.split("Really?! Yes. ");
        assert_eq!(sentences, vec!["Really?!", "Yes."]);
    }

    #[test]
    fn handles_missing_final_punctuation() {
        let sentences = PunctuationSplitter.split("First sentence. second without an end");
        assert_eq!(
            sentences,
            vec!["First sentence.", "second without an end"]
        );
    }

    #[test]
    fn empty_and_whitespace_input() {
        assert!(PunctuationSplitter.split("").is_empty());
        assert!(PunctuationSplitter.split("   \n\t ").is_empty());
    }

    #[test]
    fn sentences_are_locatable_in_source() {
        let text = "  We value growth.\n\nJoin us today!  ";
        let mut cursor = 0;
        for sentence in PunctuationSplitter.split(text) {
            let found = text[cursor..]
                .find(&sentence)
                .expect("sentence should appear in source");
            cursor += found + sentence.len();
        }
    }

    #[test]
    fn abbreviation_splitter_keeps_abbreviations_attached() {
        let text = "Tools include e.g. compilers. Apply now.";
        let sentences = AbbreviationSplitter.split(text);
        assert_eq!(sentences, vec!["Tools include e.g. compilers.", "Apply now."]);

        // The plain splitter breaks at the abbreviation.
        let naive = PunctuationSplitter.split(text);
        assert_eq!(naive.len(), 3);
    }

    #[test]
    fn abbreviation_splitter_keeps_initials_attached() {
        let text = "Report to J. Smith. Start Monday.";
        let sentences = AbbreviationSplitter.split(text);
        assert_eq!(sentences, vec!["Report to J. Smith.", "Start Monday."]);
    }

    #[test]
    fn abbreviation_splitter_still_breaks_on_exclamations() {
        let sentences = AbbreviationSplitter.split("Join us! Great benefits.");
        assert_eq!(sentences, vec!["Join us!", "Great benefits."]);
    }
}

//! biaslint - Inclusive language linter for job advertisements
//!
//! A fast, local-first analyser that flags biased and exclusionary wording
//! in job ads. Text is matched against a term dictionary with context-aware
//! exceptions, scored per category and overall, and turned into concrete
//! rewording recommendations.
//!
//! ```no_run
//! use biaslint::Analyser;
//!
//! # fn main() -> anyhow::Result<()> {
//! let analyser = Analyser::new()?;
//! let result = analyser.evaluate("We need a rockstar developer!");
//! println!("{}/100 ({})", result.overall_score, result.grade);
//! # Ok(())
//! # }
//! ```

pub mod analyser;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod models;
pub mod recommend;
pub mod reporters;
pub mod scoring;
pub mod sentences;

pub use analyser::Analyser;
pub use config::AnalysisConfig;
pub use dictionary::TermLoader;
pub use models::{
    AnalysisResult, Category, CategoryScore, DictionaryStats, FlaggedTerm, Grade, Severity,
    TermMatch,
};

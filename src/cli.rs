//! CLI argument definitions and command handlers

use crate::analyser::Analyser;
use crate::config::AnalysisConfig;
use crate::dictionary::TermLoader;
use crate::models::AnalysisResult;
use crate::reporters::{self, OutputFormat};

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Score below which the process exits non-zero, for CI gating.
const FAIL_THRESHOLD: f64 = 60.0;

/// Analyse job advertisements for biased and non-inclusive language
///
/// Runs entirely locally. Text is matched against a term dictionary with
/// context-aware exceptions, scored per category and overall, and reported
/// with concrete rewording suggestions.
#[derive(Parser, Debug)]
#[command(name = "biaslint")]
#[command(group = clap::ArgGroup::new("input").required(true))]
#[command(
    version,
    about = "Rule-based inclusivity linter for job advertisements",
    after_help = "\
Examples:
  biaslint ad.txt                        Analyse one file
  cat ad.txt | biaslint --stdin          Analyse stdin
  biaslint -d postings/ --format csv     Batch report for a directory
  biaslint ad.txt -f json -o report.json JSON report written to a file
  biaslint --stats                       Show term dictionary statistics"
)]
pub struct Cli {
    /// Path to a job ad text file
    #[arg(group = "input")]
    pub file: Option<PathBuf>,

    /// Read the job ad text from stdin
    #[arg(long, group = "input")]
    pub stdin: bool,

    /// Analyse every matching file in a directory
    #[arg(long, short = 'd', group = "input", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Filename glob for directory mode
    #[arg(long, default_value = "*.txt", value_name = "GLOB")]
    pub pattern: String,

    /// Output format: text, json, csv, markdown (or md)
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Disable ANSI colors in text output
    #[arg(long)]
    pub no_color: bool,

    /// Path to a TOML config with scoring weights and positive indicators
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to a custom term dictionary CSV (default: built-in dictionary)
    #[arg(long, value_name = "FILE")]
    pub terms: Option<PathBuf>,

    /// Print term dictionary statistics and exit
    #[arg(long, group = "input")]
    pub stats: bool,
}

impl clap::ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            OutputFormat::Text,
            OutputFormat::Json,
            OutputFormat::Csv,
            OutputFormat::Markdown,
        ]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            OutputFormat::Text => clap::builder::PossibleValue::new("text"),
            OutputFormat::Json => clap::builder::PossibleValue::new("json"),
            OutputFormat::Csv => clap::builder::PossibleValue::new("csv"),
            OutputFormat::Markdown => {
                clap::builder::PossibleValue::new("markdown").alias("md")
            }
        })
    }
}

fn build_loader(cli: &Cli) -> TermLoader {
    match &cli.terms {
        Some(path) => TermLoader::from_path(path),
        None => TermLoader::builtin(),
    }
}

fn build_analyser(cli: &Cli) -> Result<Analyser> {
    let loader = build_loader(cli);
    let mut analyser = Analyser::from_loader(&loader).context("failed to load term dictionary")?;
    if let Some(path) = &cli.config {
        let config = AnalysisConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;
        analyser = analyser.with_config(config);
    }
    Ok(analyser)
}

/// Collect files in `dir` whose file name matches `pattern`, sorted by name.
fn collect_inputs(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let glob = globset::GlobBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .with_context(|| format!("invalid glob pattern '{pattern}'"))?
        .compile_matcher();

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("cannot read {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name() else {
            continue;
        };
        if glob.is_match(name) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn write_report(cli: &Cli, report: &str) -> Result<()> {
    match &cli.output {
        Some(path) => {
            fs::write(path, report)
                .with_context(|| format!("cannot write report to {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{report}"),
    }
    Ok(())
}

fn print_stats(cli: &Cli) -> Result<()> {
    let loader = build_loader(cli);
    let stats = loader.stats().context("failed to load term dictionary")?;

    println!("Term dictionary: {} terms", stats.total_terms);
    println!("\nBy category:");
    for (category, count) in &stats.by_category {
        println!("  {:<20} {}", category.display_name(), count);
    }
    println!("\nBy severity:");
    for (severity, count) in &stats.by_severity {
        println!("  {severity:<20} {count}");
    }
    Ok(())
}

/// Read a file as text, replacing any invalid UTF-8 rather than failing.
fn read_text(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn run_batch(cli: &Cli, dir: &Path) -> Result<Vec<(String, AnalysisResult)>> {
    let analyser = build_analyser(cli)?;
    let files = collect_inputs(dir, &cli.pattern)?;
    if files.is_empty() {
        anyhow::bail!(
            "no files matching '{}' in {}",
            cli.pattern,
            dir.display()
        );
    }

    let mut results = Vec::with_capacity(files.len());
    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match read_text(path) {
            Ok(text) => {
                eprintln!("Analysing {name}...");
                results.push((name, analyser.evaluate(&text)));
            }
            Err(e) => {
                // One unreadable file should not sink the whole batch.
                warn!(file = %path.display(), error = %e, "skipping unreadable file");
                eprintln!("Skipping {name}: {e}");
            }
        }
    }
    if results.is_empty() {
        anyhow::bail!("no readable files matching '{}' in {}", cli.pattern, dir.display());
    }
    Ok(results)
}

fn run_single(cli: &Cli) -> Result<Vec<(String, AnalysisResult)>> {
    let (name, text) = if cli.stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read from stdin")?;
        ("stdin".to_string(), text)
    } else {
        let path = cli.file.as_ref().context("no input given")?;
        let text =
            read_text(path).with_context(|| format!("cannot read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        (name, text)
    };

    let analyser = build_analyser(cli)?;
    info!(input = %name, terms = analyser.term_count(), "analysing");
    Ok(vec![(name, analyser.evaluate(&text))])
}

pub fn run(cli: Cli) -> Result<()> {
    if cli.stats {
        return print_stats(&cli);
    }

    let results = match &cli.directory {
        Some(dir) => run_batch(&cli, dir)?,
        None => run_single(&cli)?,
    };

    // Colors only for text reports going to the terminal.
    let colored =
        cli.format == OutputFormat::Text && !cli.no_color && cli.output.is_none();
    let report = reporters::render_batch(&results, cli.format, colored)?;
    write_report(&cli, &report)?;

    if results.iter().any(|(_, r)| r.overall_score < FAIL_THRESHOLD) {
        std::process::exit(1);
    }
    Ok(())
}

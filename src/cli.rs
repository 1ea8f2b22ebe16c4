//! CLI interface for the exam analyzer

use crate::config::{Config, OutputFormat};
use crate::error::Result as AppResult;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "exam-analyzer")]
#[command(about = "Exam paper segmentation and word-frequency analysis tool")]
#[command(long_about = "Extract text from exam papers, split them into questions and sub-questions, count word frequencies and score papers against reference topics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split papers into questions and write one Markdown outline each
    Segment {
        /// Files or directories of exam papers (PDF, TXT, MD, images)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the Markdown outlines
        #[arg(short, long, default_value = "outlines")]
        out_dir: PathBuf,

        /// Regex marking the start of a question
        #[arg(long)]
        section_pattern: Option<String>,

        /// Regex marking the start of a sub-question
        #[arg(long)]
        subquestion_pattern: Option<String>,

        /// Fragments shorter than this are merged into the next one
        #[arg(long)]
        min_fragment_len: Option<usize>,

        /// Start a new line after every question mark
        #[arg(long)]
        break_on_question_mark: bool,
    },

    /// Count word frequencies across papers
    Frequency {
        /// Files or directories of exam papers (PDF, TXT, MD, images)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// One table per document instead of one for the whole corpus
        #[arg(long)]
        per_document: bool,

        /// Also count adjacent word pairs
        #[arg(long)]
        bigrams: bool,

        /// Keep stop words in the counts
        #[arg(long)]
        no_stopwords: bool,

        /// Newline-delimited stop-word list to use instead of the built-in one
        #[arg(long)]
        stopwords_file: Option<PathBuf>,

        /// Only count purely alphabetic tokens
        #[arg(long)]
        alphabetic_only: bool,

        /// Number of top words to show
        #[arg(short, long)]
        top: Option<usize>,

        /// Output format: console, structured (json), listing, html
        #[arg(short, long)]
        format: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Score a paper against reference topic tables
    Topics {
        /// The paper to score
        target: PathBuf,

        /// Directory of topics: saved JSON tables or documents, one per topic
        #[arg(short = 'd', long)]
        topics_dir: PathBuf,

        /// Output format: console, structured (json), listing, html
        #[arg(short, long)]
        format: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "structured" | "json" => Ok(OutputFormat::Structured),
        "listing" | "txt" => Ok(OutputFormat::Listing),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, structured, listing, html",
            format
        )),
    }
}

/// Load the configuration a command runs with. `config reset` never reads
/// the existing file, so a malformed one can still be replaced.
pub fn load_config(config_path: &Path, command: &Commands) -> AppResult<Config> {
    match command {
        Commands::Config {
            action: Some(ConfigAction::Reset),
        } => Ok(Config::default()),
        _ => Config::load_from(config_path),
    }
}

/// Fold per-run flags of a command over the loaded configuration.
pub fn apply_overrides(config: &mut Config, command: &Commands) -> Result<(), String> {
    match command {
        Commands::Segment {
            section_pattern,
            subquestion_pattern,
            min_fragment_len,
            break_on_question_mark,
            ..
        } => {
            let segmentation = &mut config.segmentation;
            if let Some(pattern) = section_pattern {
                segmentation.section_pattern = pattern.clone();
            }
            if let Some(pattern) = subquestion_pattern {
                segmentation.subquestion_pattern = pattern.clone();
            }
            if let Some(len) = min_fragment_len {
                segmentation.min_fragment_len = *len;
            }
            segmentation.break_on_question_mark |= *break_on_question_mark;
        }
        Commands::Frequency {
            bigrams,
            no_stopwords,
            stopwords_file,
            alphabetic_only,
            top,
            format,
            ..
        } => {
            let frequency = &mut config.frequency;
            frequency.include_bigrams |= *bigrams;
            frequency.alphabetic_only |= *alphabetic_only;
            if *no_stopwords {
                frequency.apply_stopwords = false;
            }
            if let Some(path) = stopwords_file {
                frequency.stopwords_file = Some(path.clone());
            }
            if let Some(n) = top {
                frequency.top_n = *n;
            }
            if let Some(format) = format {
                config.output.format = parse_output_format(format)?;
            }
        }
        Commands::Topics { format, .. } => {
            if let Some(format) = format {
                config.output.format = parse_output_format(format)?;
            }
        }
        Commands::Config { .. } => {}
    }
    Ok(())
}

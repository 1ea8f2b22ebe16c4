//! Exam analyzer: exam paper segmentation and word-frequency analysis

use anyhow::Context;
use clap::Parser;
use exam_analyzer::cli::{self, Cli, Commands, ConfigAction};
use exam_analyzer::config::{Config, OutputFormat};
use exam_analyzer::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use exam_analyzer::processing::analyzer::AnalysisEngine;
use log::{error, info};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = match cli::load_config(&config_path, &cli.command) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = cli::apply_overrides(&mut config, &cli.command) {
        error!("{}", e);
        process::exit(2);
    }

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> anyhow::Result<()> {
    match command {
        Commands::Segment { inputs, out_dir, .. } => {
            info!("Segmenting papers into {}", out_dir.display());

            let mut engine = AnalysisEngine::new(&config).context("Failed to set up the segmenter")?;
            let report = engine.segment(&inputs, &out_dir).await?;

            println!("📝 Wrote {} outline(s) to {}", report.outlines.len(), out_dir.display());
            for outline in &report.outlines {
                println!(
                    "  • {}: {} questions, {} fragments → {}",
                    outline.document,
                    outline.questions,
                    outline.fragments,
                    outline.path.display()
                );
            }
            if !report.metadata.skipped.is_empty() {
                println!("⚠️  Skipped {} document(s):", report.metadata.skipped.len());
                for skipped in &report.metadata.skipped {
                    println!("  • {}: {}", skipped.path.display(), skipped.reason);
                }
            }
        }

        Commands::Frequency {
            inputs,
            per_document,
            save,
            ..
        } => {
            let mut engine = AnalysisEngine::new(&config).context("Failed to set up the frequency analyzer")?;
            let report = engine.frequencies(&inputs, per_document).await?;

            // Saved files keep every entry; only the screen is truncated.
            let charted = matches!(config.output.format, OutputFormat::Console | OutputFormat::Html);
            let shown = if save.is_none() && charted {
                report.truncated(config.frequency.top_n)
            } else {
                report
            };

            let generator = ReportGenerator::with_options(config.output.color_output && save.is_none(), true, true);
            let content = generator.generate_frequency_report(&shown, &config.output.format)?;
            emit(&content, save, &config.output.format, "frequencies")?;
        }

        Commands::Topics {
            target,
            topics_dir,
            save,
            ..
        } => {
            let mut engine = AnalysisEngine::new(&config).context("Failed to set up the topic scorer")?;
            let report = engine
                .topics(&target, &topics_dir)
                .await
                .with_context(|| format!("Failed to score {} against {}", target.display(), topics_dir.display()))?;

            let generator = ReportGenerator::with_options(config.output.color_output && save.is_none(), true, true);
            let content = generator.generate_topic_report(&report, &config.output.format)?;
            emit(&content, save, &config.output.format, "topics")?;
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
                println!("{}", content);
            }
            ConfigAction::Path => {
                println!("{}", config_path.display());
            }
            ConfigAction::Reset => {
                Config::default()
                    .save_to(&config_path)
                    .with_context(|| format!("Failed to reset {}", config_path.display()))?;
                println!("✅ Configuration reset to defaults: {}", config_path.display());
            }
        },
    }

    Ok(())
}

/// Print `content`, or write it to `save`. A directory target gets a
/// suggested file name.
fn emit(content: &str, save: Option<PathBuf>, format: &OutputFormat, base_name: &str) -> anyhow::Result<()> {
    match save {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(suggest_filename(format, base_name, true))
            } else {
                path
            };
            save_report_to_file(content, &path).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("💾 Saved to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

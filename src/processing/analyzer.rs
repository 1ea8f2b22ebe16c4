//! Analysis engine: runs the segment, frequency and topic pipelines over a batch

use crate::config::{Config, FrequencyConfig};
use crate::error::{ExamAnalyzerError, Result};
use crate::input::discovery::collect_inputs;
use crate::input::file_detector::FileType;
use crate::input::manager::InputManager;
use crate::input::stopwords;
use crate::output::report::{
    FrequencyReport, NamedTable, ReportMetadata, SegmentationReport, TopicReport, WrittenOutline,
};
use crate::processing::batch::{run_batch, SkippedDocument};
use crate::processing::document::Document;
use crate::processing::frequency::{FrequencyAnalyzer, FrequencyOptions, FrequencyTable};
use crate::processing::segmenter::Segmenter;
use crate::processing::topics::{score_topics, Topic};
use log::{info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// A saved table on disk: either a bare word→count object or a full
/// frequency report.
#[derive(Deserialize)]
#[serde(untagged)]
enum SavedTable {
    Table(FrequencyTable),
    Report(FrequencyReport),
}

pub struct AnalysisEngine {
    config: Config,
    segmenter: Segmenter,
    frequency_analyzer: Option<FrequencyAnalyzer>,
    input_manager: InputManager,
    show_progress: bool,
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Result<Self> {
        let segmenter = Segmenter::new(&config.segmentation)?;

        Ok(Self {
            config: config.clone(),
            segmenter,
            frequency_analyzer: None,
            input_manager: InputManager::from_config(&config.extraction),
            show_progress: true,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn inputs(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        collect_inputs(paths, self.config.extraction.recursive)
    }

    /// Segment every input and write one Markdown outline per document into
    /// `out_dir`.
    pub async fn segment(&mut self, paths: &[PathBuf], out_dir: &Path) -> Result<SegmentationReport> {
        let started = Instant::now();
        let inputs = self.inputs(paths)?;
        std::fs::create_dir_all(out_dir)?;

        let segmenter = &self.segmenter;
        let outcome = run_batch(&mut self.input_manager, &inputs, self.show_progress, |document| {
            let segmented = segmenter.segment(&document)?;
            let path = out_dir.join(format!("{}.md", segmented.id));
            std::fs::write(&path, segmented.to_markdown())?;
            info!("Wrote {}", path.display());

            Ok(WrittenOutline {
                document: segmented.id.clone(),
                path,
                questions: segmented.question_count(),
                fragments: segmented.fragment_count(),
            })
        })
        .await?;

        let documents = outcome.processed.iter().map(|o| o.document.clone()).collect();
        Ok(SegmentationReport {
            metadata: ReportMetadata::new(documents, outcome.skipped, elapsed_ms(started)),
            outlines: outcome.processed,
        })
    }

    /// Count words across all inputs, as one corpus table or one table per
    /// document.
    pub async fn frequencies(&mut self, paths: &[PathBuf], per_document: bool) -> Result<FrequencyReport> {
        let started = Instant::now();
        let inputs = self.inputs(paths)?;
        let analyzer = loaded_analyzer(&mut self.frequency_analyzer, &self.config.frequency)?;

        let outcome = run_batch(&mut self.input_manager, &inputs, self.show_progress, Ok).await?;
        let (documents, skipped) = (outcome.processed, outcome.skipped);
        let ids: Vec<String> = documents.iter().map(|d| d.id.clone()).collect();

        let tables = if per_document {
            documents
                .iter()
                .map(|doc| NamedTable {
                    name: doc.id.clone(),
                    table: analyzer.analyze(&doc.text),
                })
                .collect()
        } else {
            vec![NamedTable {
                name: "corpus".to_string(),
                table: analyzer.analyze_corpus(documents.iter().map(|d| d.text.as_str())),
            }]
        };

        Ok(FrequencyReport {
            metadata: ReportMetadata::new(ids, skipped, elapsed_ms(started)),
            tables,
        })
    }

    /// Score one document against every topic found in `topics_dir`.
    pub async fn topics(&mut self, target: &Path, topics_dir: &Path) -> Result<TopicReport> {
        let started = Instant::now();

        let analyzer = loaded_analyzer(&mut self.frequency_analyzer, &self.config.frequency)?;

        let document = self.input_manager.load_document(target).await?;
        let target_table = analyzer.analyze(&document.text);

        let (topics, skipped) = read_topics(&mut self.input_manager, analyzer, topics_dir).await?;
        let score = score_topics(&target_table, &topics)?;

        let metadata = ReportMetadata::new(vec![document.id.clone()], skipped, elapsed_ms(started));
        Ok(TopicReport::new(metadata, document.id, &score))
    }

    /// Topics are the files of `dir`: saved JSON tables are read as-is, any
    /// other document is extracted and counted. The topic name is the file
    /// stem.
    pub async fn load_topics(&mut self, dir: &Path) -> Result<(Vec<Topic>, Vec<SkippedDocument>)> {
        let analyzer = loaded_analyzer(&mut self.frequency_analyzer, &self.config.frequency)?;
        read_topics(&mut self.input_manager, analyzer, dir).await
    }
}

/// The analyzer is built on first use, so commands that never count words do
/// not need a readable stop-word source.
fn loaded_analyzer<'a>(
    slot: &'a mut Option<FrequencyAnalyzer>,
    config: &FrequencyConfig,
) -> Result<&'a FrequencyAnalyzer> {
    let analyzer = match slot.take() {
        Some(analyzer) => analyzer,
        None => {
            let options = FrequencyOptions::from(config);
            let stop_words = if options.apply_stopwords {
                stopwords::load(config)?
            } else {
                Default::default()
            };
            FrequencyAnalyzer::new(options, stop_words)
        }
    };
    Ok(slot.insert(analyzer))
}

async fn read_topics(
    input_manager: &mut InputManager,
    analyzer: &FrequencyAnalyzer,
    dir: &Path,
) -> Result<(Vec<Topic>, Vec<SkippedDocument>)> {
    if !dir.is_dir() {
        return Err(ExamAnalyzerError::MissingInput(dir.to_path_buf()));
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    entries.sort();

    let mut topics = Vec::new();
    let mut skipped = Vec::new();

    for path in entries {
        let name = Document::id_from_path(&path);
        let loaded = match FileType::from_path(&path) {
            FileType::Json => read_saved_table(&path),
            file_type if file_type.is_document() => input_manager
                .extract_text(&path)
                .await
                .map(|text| analyzer.analyze(&text)),
            _ => continue,
        };

        match loaded {
            Ok(table) => topics.push(Topic::new(name, table)),
            Err(e) if e.is_recoverable() || matches!(e, ExamAnalyzerError::Serialization(_)) => {
                warn!("Skipping topic {}: {}", path.display(), e);
                skipped.push(SkippedDocument {
                    path,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    info!("Loaded {} topics from {}", topics.len(), dir.display());
    Ok((topics, skipped))
}

fn read_saved_table(path: &Path) -> Result<FrequencyTable> {
    let content = std::fs::read_to_string(path)?;
    let saved: SavedTable = serde_json::from_str(&content)?;
    Ok(match saved {
        SavedTable::Table(table) => table,
        SavedTable::Report(report) => report.combined(),
    })
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

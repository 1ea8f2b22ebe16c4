//! Sequential batch processing with per-document failure isolation

use crate::error::{ExamAnalyzerError, Result};
use crate::input::manager::InputManager;
use crate::processing::document::Document;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A document left out of a batch, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug)]
pub struct BatchOutcome<T> {
    pub processed: Vec<T>,
    pub skipped: Vec<SkippedDocument>,
}

impl<T> BatchOutcome<T> {
    pub fn total(&self) -> usize {
        self.processed.len() + self.skipped.len()
    }
}

fn progress_bar(len: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    bar
}

/// Load each input in turn and hand it to `step`.
///
/// Recoverable failures (missing file, extraction or OCR failure, pattern
/// mismatch) skip only the document they concern; anything else aborts the
/// batch. When no document survives, the batch fails with
/// `NothingToProcess`.
pub async fn run_batch<T, F>(
    manager: &mut InputManager,
    inputs: &[PathBuf],
    show_progress: bool,
    mut step: F,
) -> Result<BatchOutcome<T>>
where
    F: FnMut(Document) -> Result<T>,
{
    if inputs.is_empty() {
        return Err(ExamAnalyzerError::NothingToProcess("no input documents".to_string()));
    }

    let bar = progress_bar(inputs.len(), show_progress);
    let mut processed = Vec::with_capacity(inputs.len());
    let mut skipped = Vec::new();

    for path in inputs {
        bar.set_message(path.display().to_string());

        let result = match manager.load_document(path).await {
            Ok(document) => step(document),
            Err(e) => Err(e),
        };

        match result {
            Ok(value) => processed.push(value),
            Err(e) if e.is_recoverable() => {
                warn!("Skipping {}: {}", path.display(), e);
                skipped.push(SkippedDocument {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                bar.abandon();
                return Err(e);
            }
        }
        bar.inc(1);
    }

    bar.finish_and_clear();

    if processed.is_empty() {
        return Err(ExamAnalyzerError::NothingToProcess(format!(
            "all {} documents were skipped",
            skipped.len()
        )));
    }

    Ok(BatchOutcome { processed, skipped })
}

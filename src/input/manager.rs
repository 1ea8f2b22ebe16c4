//! Input manager for handling different file types

use crate::config::ExtractionConfig;
use crate::error::{ExamAnalyzerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, OcrExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::document::Document;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    ocr: Option<OcrExtractor>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Manager without OCR: scanned PDFs and images cannot be read.
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            ocr: None,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        let mut manager = Self::new();
        if config.ocr_enabled {
            manager.ocr = Some(OcrExtractor::new(&config.ocr_command, &config.ocr_language));
        }
        manager
    }

    pub async fn load_document(&mut self, path: &Path) -> Result<Document> {
        let text = self.extract_text(path).await?;
        Ok(Document::new(path, text))
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(ExamAnalyzerError::MissingInput(path.to_path_buf()));
        }

        let text = match FileType::from_path(path) {
            FileType::Pdf => self.extract_pdf(path).await?,
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Image => {
                info!("Running OCR on image: {}", path.display());
                self.ocr_extractor(path)?.extract(path).await?
            }
            FileType::Json | FileType::Unknown => {
                return Err(ExamAnalyzerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        self.cache.insert(path_str, text.clone());
        Ok(text)
    }

    /// Text layer first, OCR when the layer is empty or unreadable.
    async fn extract_pdf(&self, path: &Path) -> Result<String> {
        let text_layer = PdfExtractor.extract(path).await;

        match (text_layer, &self.ocr) {
            (Ok(text), _) if !text.trim().is_empty() => {
                info!("Using PDF text layer for file {}", path.display());
                Ok(text)
            }
            (Ok(text), None) => Ok(text),
            (Err(e), None) => Err(e),
            (result, Some(ocr)) => {
                if let Err(e) = result {
                    warn!("{}; falling back to OCR", e);
                }
                info!("Using OCR for file {}", path.display());
                ocr.extract(path).await
            }
        }
    }

    fn ocr_extractor(&self, path: &Path) -> Result<&OcrExtractor> {
        self.ocr.as_ref().ok_or_else(|| {
            ExamAnalyzerError::UnsupportedFormat(format!("OCR is disabled, cannot read image: {}", path.display()))
        })
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

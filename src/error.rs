//! Error handling for the exam analyzer

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExamAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Parsing error with file '{file}': no match for pattern `{pattern}`, change the pattern and try again")]
    PatternMismatch { file: String, pattern: String },

    #[error("No reference topics supplied, cannot compute topic scores")]
    EmptyReferenceSet,

    #[error("Nothing to process: {0}")]
    NothingToProcess(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ExamAnalyzerError {
    /// Whether the failure only concerns the current document or operation,
    /// so a batch can report it and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExamAnalyzerError::Io(_)
                | ExamAnalyzerError::MissingInput(_)
                | ExamAnalyzerError::PatternMismatch { .. }
                | ExamAnalyzerError::EmptyReferenceSet
                | ExamAnalyzerError::PdfExtraction(_)
                | ExamAnalyzerError::Ocr(_)
                | ExamAnalyzerError::UnsupportedFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ExamAnalyzerError>;

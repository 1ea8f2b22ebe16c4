//! Input processing module
//! Handles file discovery, type detection, text extraction and stop-word sources

pub mod discovery;
pub mod file_detector;
pub mod manager;
pub mod stopwords;
pub mod text_extractor;

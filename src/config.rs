//! Configuration management for the exam analyzer

use crate::error::{ExamAnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub segmentation: SegmentationConfig,
    pub frequency: FrequencyConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    pub section_pattern: String,
    pub subquestion_pattern: String,
    pub min_fragment_len: usize,
    pub break_on_question_mark: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyConfig {
    pub include_bigrams: bool,
    pub apply_stopwords: bool,
    pub alphabetic_only: bool,
    pub stopword_language: String,
    pub stopwords_file: Option<PathBuf>,
    pub top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub ocr_enabled: bool,
    pub ocr_command: String,
    pub ocr_language: String,
    pub recursive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Structured,
    Listing,
    Html,
}

pub const DEFAULT_SECTION_PATTERN: &str = r"Question \d+";
pub const DEFAULT_SUBQUESTION_PATTERN: &str = r"\([a-z]+\)\s+[A-Z]";
pub const DEFAULT_MIN_FRAGMENT_LEN: usize = 7;

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            section_pattern: DEFAULT_SECTION_PATTERN.to_string(),
            subquestion_pattern: DEFAULT_SUBQUESTION_PATTERN.to_string(),
            min_fragment_len: DEFAULT_MIN_FRAGMENT_LEN,
            break_on_question_mark: false,
        }
    }
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            include_bigrams: false,
            apply_stopwords: true,
            alphabetic_only: false,
            stopword_language: "english".to_string(),
            stopwords_file: None,
            top_n: 70,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ocr_enabled: true,
            ocr_command: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
            recursive: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            segmentation: SegmentationConfig::default(),
            frequency: FrequencyConfig::default(),
            extraction: ExtractionConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the configuration from `config_path`, writing the defaults there
    /// on first use.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ExamAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ExamAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("exam-analyzer")
            .join("config.toml")
    }
}

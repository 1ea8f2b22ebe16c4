//! Stop-word sources: built-in language lists or a user-supplied file

use crate::config::FrequencyConfig;
use crate::error::{ExamAnalyzerError, Result};
use crate::processing::frequency::StopWords;
use log::info;
use std::path::Path;
use stop_words::{get, LANGUAGE};

pub fn builtin(language: &str) -> Result<StopWords> {
    let language = match language.to_lowercase().as_str() {
        "english" | "en" => LANGUAGE::English,
        "french" | "fr" => LANGUAGE::French,
        "german" | "de" => LANGUAGE::German,
        "spanish" | "es" => LANGUAGE::Spanish,
        "italian" | "it" => LANGUAGE::Italian,
        "portuguese" | "pt" => LANGUAGE::Portuguese,
        other => {
            return Err(ExamAnalyzerError::Configuration(format!(
                "Unsupported stop-word language: {}. Supported: english, french, german, spanish, italian, portuguese",
                other
            )))
        }
    };

    let words: Vec<String> = get(language);
    Ok(StopWords::new(words))
}

/// Newline-delimited list; blank lines are ignored.
pub fn from_file(path: &Path) -> Result<StopWords> {
    if !path.exists() {
        return Err(ExamAnalyzerError::MissingInput(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(StopWords::new(content.lines()))
}

pub fn load(config: &FrequencyConfig) -> Result<StopWords> {
    let stop_words = match &config.stopwords_file {
        Some(path) => from_file(path)?,
        None => builtin(&config.stopword_language)?,
    };
    info!("Loaded {} stop words", stop_words.len());
    Ok(stop_words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_english_has_common_words() {
        let words = builtin("english").unwrap();
        assert!(words.contains("the"));
        assert!(words.contains("and"));
        assert!(!words.contains("photosynthesis"));
    }

    #[test]
    fn test_unknown_language_is_configuration_error() {
        assert!(matches!(builtin("klingon"), Err(ExamAnalyzerError::Configuration(_))));
    }

    #[test]
    fn test_file_list_is_trimmed_and_lowercased() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stop.txt");
        std::fs::write(&path, "The\n  marks \n\nQUESTION\n").unwrap();

        let words = from_file(&path).unwrap();

        assert_eq!(words.len(), 3);
        assert!(words.contains("the"));
        assert!(words.contains("marks"));
        assert!(words.contains("question"));
    }

    #[test]
    fn test_missing_file_is_missing_input() {
        let err = from_file(Path::new("no/such/stopwords.txt")).unwrap_err();
        assert!(matches!(err, ExamAnalyzerError::MissingInput(_)));
    }

    #[test]
    fn test_config_prefers_file_over_language() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stop.txt");
        std::fs::write(&path, "only\n").unwrap();

        let config = FrequencyConfig {
            stopwords_file: Some(path),
            ..FrequencyConfig::default()
        };
        let words = load(&config).unwrap();
        assert_eq!(words.len(), 1);
    }
}

//! Integration tests for the exam analyzer

use exam_analyzer::config::Config;
use exam_analyzer::input::manager::InputManager;
use exam_analyzer::output::formatter::{OutputFormatter, StructuredFormatter};
use exam_analyzer::processing::analyzer::AnalysisEngine;
use exam_analyzer::processing::segmenter::Segmenter;
use exam_analyzer::ExamAnalyzerError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn test_config() -> Config {
    let mut config = Config::default();
    config.extraction.ocr_enabled = false;
    config.frequency.stopwords_file = Some(PathBuf::from("tests/fixtures/stopwords.txt"));
    config
}

fn engine() -> AnalysisEngine {
    AnalysisEngine::new(&test_config()).unwrap().with_progress(false)
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_exam.txt"))
        .await
        .unwrap();

    assert!(text.contains("BIOLOGY PAPER 1"));
    assert!(text.contains("Question 2"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_exam.md"))
        .await
        .unwrap();

    assert!(text.contains("Answer all questions."));
    assert!(text.contains("(a) Define force and state its unit."));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_exam.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_and_missing_files() {
    let mut manager = InputManager::new();

    let unsupported = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(unsupported, Err(ExamAnalyzerError::UnsupportedFormat(_))));

    let missing = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(matches!(missing, Err(ExamAnalyzerError::MissingInput(_))));
}

#[tokio::test]
async fn test_image_without_ocr_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("scan.png");
    fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

    let mut manager = InputManager::new();
    let result = manager.extract_text(&image).await;
    assert!(matches!(result, Err(ExamAnalyzerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_segment_fixture_paper() {
    let mut manager = InputManager::new();
    let document = manager
        .load_document(Path::new("tests/fixtures/sample_exam.txt"))
        .await
        .unwrap();

    let segmenter = Segmenter::new(&test_config().segmentation).unwrap();
    let segmented = segmenter.segment(&document).unwrap();

    assert_eq!(segmented.id, "sample_exam");
    assert_eq!(segmented.question_count(), 2);
    assert_eq!(segmented.sections[0].marker, None);
    assert_eq!(segmented.sections[1].fragments.len(), 2);
    assert_eq!(segmented.sections[2].fragments.len(), 2);

    let markdown = segmented.to_markdown();
    assert!(markdown.starts_with("BIOLOGY PAPER 1 Answer ALL questions in the spaces provided."));
    assert!(markdown.contains(
        "# Question 1\n\n(a) Name the organelle where photosynthesis takes place.\n\n(b) Explain why the cell wall is important to a plant cell."
    ));
    assert!(markdown.contains("# Question 2\n\n(a) Describe the process of osmosis in a plant cell."));
}

#[tokio::test]
async fn test_segment_batch_skips_bad_documents() {
    let out = TempDir::new().unwrap();
    let inputs = vec![
        PathBuf::from("tests/fixtures/no_subquestions.txt"),
        PathBuf::from("tests/fixtures/sample_exam.txt"),
        PathBuf::from("tests/fixtures/unsupported.xyz"),
        PathBuf::from("tests/fixtures/nonexistent.pdf"),
    ];

    let report = engine().segment(&inputs, out.path()).await.unwrap();

    assert_eq!(report.outlines.len(), 1);
    assert_eq!(report.outlines[0].document, "sample_exam");
    assert_eq!(report.metadata.skipped.len(), 3);
    assert!(report.metadata.skipped[0].reason.contains("no_subquestions.txt"));

    let written = fs::read_to_string(out.path().join("sample_exam.md")).unwrap();
    assert!(written.contains("# Question 2"));
    assert!(!out.path().join("no_subquestions.md").exists());
}

#[tokio::test]
async fn test_segment_nothing_to_process() {
    let out = TempDir::new().unwrap();
    let empty = TempDir::new().unwrap();

    let err = engine()
        .segment(&[empty.path().to_path_buf()], out.path())
        .await
        .unwrap_err();
    assert!(matches!(err, ExamAnalyzerError::NothingToProcess(_)));
}

#[tokio::test]
async fn test_frequency_of_fixture_paper() {
    let report = engine()
        .frequencies(&[PathBuf::from("tests/fixtures/sample_exam.txt")], false)
        .await
        .unwrap();

    let table = &report.tables[0].table;
    assert_eq!(table.get("plant"), Some(3));
    assert_eq!(table.get("cell"), Some(2));
    assert_eq!(table.get("osmosis"), Some(1));
    assert_eq!(table.get("the"), None);

    let counts: Vec<usize> = table.iter().map(|(_, c)| c).collect();
    assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn test_per_document_frequencies() {
    let inputs = vec![
        PathBuf::from("tests/fixtures/sample_exam.txt"),
        PathBuf::from("tests/fixtures/sample_exam.md"),
    ];
    let report = engine().frequencies(&inputs, true).await.unwrap();

    let names: Vec<&str> = report.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["sample_exam", "sample_exam"]);
    assert_eq!(report.tables[1].table.get("force"), Some(2));
}

#[tokio::test]
async fn test_topic_scoring_against_fixture_topics() {
    let report = engine()
        .topics(
            Path::new("tests/fixtures/sample_exam.txt"),
            Path::new("tests/fixtures/topics"),
        )
        .await
        .unwrap();

    assert_eq!(report.target, "sample_exam");
    assert_eq!(report.topics[0].topic, "biology");
    assert_eq!(report.topics[0].score, 8);
    assert_eq!(report.topics[1].topic, "physics");
    assert_eq!(report.topics[1].score, 0);
    assert!((report.topics[0].share - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_saved_frequency_report_is_reusable_as_topic() {
    let topics = TempDir::new().unwrap();

    let report = engine()
        .frequencies(&[PathBuf::from("tests/fixtures/sample_exam.md")], false)
        .await
        .unwrap();
    let json = StructuredFormatter::new(true).format_frequencies(&report).unwrap();
    fs::write(topics.path().join("mechanics.json"), json).unwrap();

    let scored = engine()
        .topics(Path::new("tests/fixtures/topics/physics.txt"), topics.path())
        .await
        .unwrap();

    assert_eq!(scored.topics[0].topic, "mechanics");
    assert!(scored.topics[0].score > 0);
}

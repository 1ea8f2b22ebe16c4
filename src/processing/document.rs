//! Document structures for extracted and segmented exam papers

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One source file's extracted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub source: PathBuf,
    pub text: String,
}

/// A top-level subdivision of a document, introduced by a section marker
/// such as "Question 12". The preamble before the first marker has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub index: usize,
    pub marker: Option<String>,
    pub fragments: Vec<Fragment>,
}

/// A sub-question level span of text within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub marker: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentedDocument {
    pub id: String,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(source: impl Into<PathBuf>, text: String) -> Self {
        let source = source.into();
        let id = Self::id_from_path(&source);
        Self { id, source, text }
    }

    /// Identifier derived from the file name with its extension stripped.
    pub fn id_from_path(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string())
    }

    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.id.clone())
    }
}

impl Fragment {
    pub fn new(marker: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            marker: marker.map(str::to_string),
            text: text.into(),
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl Section {
    /// The section's text as it appeared in the preprocessed document.
    pub fn raw_text(&self) -> String {
        let mut text = self.marker.clone().unwrap_or_default();
        for fragment in &self.fragments {
            text.push_str(&fragment.text);
        }
        text
    }

    /// Markdown block: the marker as a heading, then each fragment as its
    /// own paragraph.
    pub fn to_markdown(&self) -> String {
        let mut blocks = Vec::with_capacity(self.fragments.len() + 1);

        if let Some(marker) = &self.marker {
            blocks.push(format!("# {}", marker.trim()));
        }

        blocks.extend(
            self.fragments
                .iter()
                .map(|fragment| fragment.text.trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string),
        );

        blocks.join("\n\n")
    }
}

impl SegmentedDocument {
    pub fn fragment_count(&self) -> usize {
        self.sections.iter().map(|s| s.fragments.len()).sum()
    }

    /// Number of sections introduced by a marker (the preamble excluded).
    pub fn question_count(&self) -> usize {
        self.sections.iter().filter(|s| s.marker.is_some()).count()
    }

    pub fn raw_text(&self) -> String {
        self.sections.iter().map(Section::raw_text).collect()
    }

    pub fn to_markdown(&self) -> String {
        let mut output = self
            .sections
            .iter()
            .map(Section::to_markdown)
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        output.push('\n');
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SegmentedDocument {
        SegmentedDocument {
            id: "paper".to_string(),
            sections: vec![
                Section {
                    index: 0,
                    marker: None,
                    fragments: vec![Fragment::new(None, "Answer all questions. ")],
                },
                Section {
                    index: 1,
                    marker: Some("Question 1".to_string()),
                    fragments: vec![
                        Fragment::new(None, " Read the passage. "),
                        Fragment::new(Some("(a) E"), "(a) Explain the theme. "),
                        Fragment::new(Some("(b) D"), "(b) Describe the setting."),
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_document_id_strips_extension() {
        let doc = Document::new("pdfs/maths_2018_p1.pdf", "text".to_string());
        assert_eq!(doc.id, "maths_2018_p1");
        assert_eq!(doc.file_name(), "maths_2018_p1.pdf");
    }

    #[test]
    fn test_raw_text_includes_markers() {
        let doc = sample();
        assert_eq!(
            doc.raw_text(),
            "Answer all questions. Question 1 Read the passage. (a) Explain the theme. (b) Describe the setting."
        );
    }

    #[test]
    fn test_markdown_headings_and_paragraphs() {
        let markdown = sample().to_markdown();
        assert_eq!(
            markdown,
            "Answer all questions.\n\n# Question 1\n\nRead the passage.\n\n(a) Explain the theme.\n\n(b) Describe the setting.\n"
        );
    }

    #[test]
    fn test_counts() {
        let doc = sample();
        assert_eq!(doc.fragment_count(), 4);
        assert_eq!(doc.question_count(), 1);
    }
}

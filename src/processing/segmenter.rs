//! Splitting exam text into questions and sub-questions

use crate::config::SegmentationConfig;
use crate::error::{ExamAnalyzerError, Result};
use crate::processing::document::{Document, Fragment, Section, SegmentedDocument};
use crate::processing::split::split_keep_delimiter;
use crate::processing::text_processor::TextProcessor;
use log::debug;
use regex::Regex;

pub struct Segmenter {
    section_regex: Regex,
    subquestion_regex: Regex,
    min_fragment_len: usize,
    text_processor: TextProcessor,
}

impl Segmenter {
    pub fn new(config: &SegmentationConfig) -> Result<Self> {
        Ok(Self {
            section_regex: Regex::new(&config.section_pattern)?,
            subquestion_regex: Regex::new(&config.subquestion_pattern)?,
            min_fragment_len: config.min_fragment_len,
            text_processor: TextProcessor::new(config.break_on_question_mark),
        })
    }

    pub fn preprocess(&self, text: &str) -> String {
        self.text_processor.preprocess(text)
    }

    /// Segment a document into sections and merged fragments.
    ///
    /// Fails with `PatternMismatch` when the sub-question pattern matches
    /// nowhere in the document.
    pub fn segment(&self, document: &Document) -> Result<SegmentedDocument> {
        let text = self.preprocess(&document.text);
        let mut sections = self.split_sections(&text);

        let subquestions = sections
            .iter()
            .flat_map(|s| &s.fragments)
            .filter(|f| f.marker.is_some())
            .count();

        if subquestions == 0 {
            return Err(ExamAnalyzerError::PatternMismatch {
                file: document.file_name(),
                pattern: self.subquestion_regex.as_str().to_string(),
            });
        }

        for section in &mut sections {
            section.fragments = merge_short_fragments(std::mem::take(&mut section.fragments), self.min_fragment_len);
        }

        debug!(
            "Segmented {}: {} sections, {} sub-question markers",
            document.id,
            sections.len(),
            subquestions
        );

        Ok(SegmentedDocument {
            id: document.id.clone(),
            sections,
        })
    }

    /// Split preprocessed text into sections and their unmerged fragments.
    pub fn split_sections(&self, text: &str) -> Vec<Section> {
        split_keep_delimiter(&self.section_regex, text)
            .into_iter()
            .enumerate()
            .map(|(index, segment)| Section {
                index,
                marker: segment.marker.map(str::to_string),
                fragments: self.split_fragments(segment.body),
            })
            .collect()
    }

    fn split_fragments(&self, body: &str) -> Vec<Fragment> {
        split_keep_delimiter(&self.subquestion_regex, body)
            .into_iter()
            .map(|segment| Fragment::new(segment.marker, segment.to_text()))
            .collect()
    }
}

/// Fold fragments shorter than `min_len` characters into the fragment that
/// follows them. The last fragment is kept as-is since nothing can absorb it.
pub fn merge_short_fragments(fragments: Vec<Fragment>, min_len: usize) -> Vec<Fragment> {
    let total = fragments.len();
    let mut merged = Vec::with_capacity(total);
    let mut carried = String::new();

    for (i, mut fragment) in fragments.into_iter().enumerate() {
        if !carried.is_empty() {
            fragment.text.insert_str(0, &carried);
            carried.clear();
        }

        let is_last = i + 1 == total;
        if fragment.char_len() < min_len && !is_last {
            carried = fragment.text;
        } else {
            merged.push(fragment);
        }
    }

    merged
}

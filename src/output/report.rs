//! Report structures handed to the formatters

use crate::processing::batch::SkippedDocument;
use crate::processing::frequency::FrequencyTable;
use crate::processing::topics::TopicScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Report metadata and generation info
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub processing_time_ms: u64,
    /// Identifiers of the documents that contributed to the report
    pub documents: Vec<String>,
    pub skipped: Vec<SkippedDocument>,
}

impl ReportMetadata {
    pub fn new(documents: Vec<String>, skipped: Vec<SkippedDocument>, processing_time_ms: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            processing_time_ms,
            documents,
            skipped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedTable {
    pub name: String,
    pub table: FrequencyTable,
}

/// Word frequencies for a whole corpus or for each document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyReport {
    pub metadata: ReportMetadata,
    pub tables: Vec<NamedTable>,
}

impl FrequencyReport {
    /// Sum of all tables, used when a saved report serves as a topic.
    pub fn combined(&self) -> FrequencyTable {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for named in &self.tables {
            for (word, count) in named.table.iter() {
                *counts.entry(word.to_string()).or_insert(0) += count;
            }
        }
        FrequencyTable::from_counts(counts)
    }

    /// Keep only the `n` highest-ranked entries of each table.
    pub fn truncated(&self, n: usize) -> Self {
        Self {
            metadata: self.metadata.clone(),
            tables: self
                .tables
                .iter()
                .map(|named| NamedTable {
                    name: named.name.clone(),
                    table: named.table.top(n),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicShare {
    pub topic: String,
    pub score: usize,
    pub share: f64,
}

/// Topic affinity of one target document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicReport {
    pub metadata: ReportMetadata,
    pub target: String,
    pub topics: Vec<TopicShare>,
}

impl TopicReport {
    pub fn new(metadata: ReportMetadata, target: String, score: &TopicScore) -> Self {
        let topics = score
            .scores
            .iter()
            .zip(score.shares())
            .map(|((topic, score), (_, share))| TopicShare {
                topic: topic.clone(),
                score: *score,
                share,
            })
            .collect();

        Self {
            metadata,
            target,
            topics,
        }
    }
}

/// One Markdown outline written by the segment command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrittenOutline {
    pub document: String,
    pub path: PathBuf,
    pub questions: usize,
    pub fragments: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationReport {
    pub metadata: ReportMetadata,
    pub outlines: Vec<WrittenOutline>,
}

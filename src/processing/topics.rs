//! Scoring a document's affinity to reference topics

use crate::error::{ExamAnalyzerError, Result};
use crate::processing::frequency::FrequencyTable;
use serde::{Deserialize, Serialize};

/// A named reference frequency table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub table: FrequencyTable,
}

impl Topic {
    pub fn new(name: impl Into<String>, table: FrequencyTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

/// Topic scores ranked by descending score, ties by topic name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicScore {
    pub scores: Vec<(String, usize)>,
}

impl TopicScore {
    pub fn get(&self, topic: &str) -> Option<usize> {
        self.scores.iter().find(|(name, _)| name == topic).map(|(_, s)| *s)
    }

    pub fn total(&self) -> usize {
        self.scores.iter().map(|(_, s)| s).sum()
    }

    /// Each topic's fraction of the total score. All zero when nothing
    /// matched.
    pub fn shares(&self) -> Vec<(String, f64)> {
        let total = self.total();
        self.scores
            .iter()
            .map(|(name, score)| {
                let share = if total == 0 { 0.0 } else { *score as f64 / total as f64 };
                (name.clone(), share)
            })
            .collect()
    }

    pub fn best(&self) -> Option<&(String, usize)> {
        self.scores.first().filter(|(_, score)| *score > 0)
    }
}

/// Score `target` against every topic by summing the target's own counts
/// for words that appear in the topic's vocabulary.
pub fn score_topics(target: &FrequencyTable, topics: &[Topic]) -> Result<TopicScore> {
    if topics.is_empty() {
        return Err(ExamAnalyzerError::EmptyReferenceSet);
    }

    let mut scores: Vec<(String, usize)> = topics
        .iter()
        .map(|topic| {
            let vocabulary = topic.table.words();
            let score = target
                .iter()
                .filter(|(word, _)| vocabulary.contains(word))
                .map(|(_, count)| count)
                .sum();
            (topic.name.clone(), score)
        })
        .collect();

    scores.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(TopicScore { scores })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table(pairs: &[(&str, usize)]) -> FrequencyTable {
        FrequencyTable::from_counts(pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect::<HashMap<_, _>>())
    }

    #[test]
    fn test_uses_target_counts_not_topic_counts() {
        let target = table(&[("cat", 2), ("dog", 1)]);
        let topics = vec![Topic::new("animals", table(&[("cat", 5)]))];

        let score = score_topics(&target, &topics).unwrap();

        assert_eq!(score.scores, vec![("animals".to_string(), 2)]);
    }

    #[test]
    fn test_empty_topic_scores_zero() {
        let target = table(&[("cat", 2)]);
        let topics = vec![Topic::new("empty", FrequencyTable::default())];

        let score = score_topics(&target, &topics).unwrap();
        assert_eq!(score.get("empty"), Some(0));
        assert_eq!(score.best(), None);
    }

    #[test]
    fn test_no_topics_is_an_error() {
        let err = score_topics(&table(&[("cat", 1)]), &[]).unwrap_err();
        assert!(matches!(err, ExamAnalyzerError::EmptyReferenceSet));
    }

    #[test]
    fn test_ranked_descending() {
        let target = table(&[("force", 4), ("mass", 3), ("cell", 1), ("gene", 1)]);
        let topics = vec![
            Topic::new("biology", table(&[("cell", 10), ("gene", 7)])),
            Topic::new("physics", table(&[("force", 1), ("mass", 1)])),
            Topic::new("chemistry", table(&[("mole", 2)])),
        ];

        let score = score_topics(&target, &topics).unwrap();

        assert_eq!(
            score.scores,
            vec![
                ("physics".to_string(), 7),
                ("biology".to_string(), 2),
                ("chemistry".to_string(), 0),
            ]
        );
        assert_eq!(score.best().map(|(name, _)| name.as_str()), Some("physics"));
    }

    #[test]
    fn test_shares_sum_to_one() {
        let target = table(&[("force", 3), ("cell", 1)]);
        let topics = vec![
            Topic::new("physics", table(&[("force", 1)])),
            Topic::new("biology", table(&[("cell", 1)])),
        ];

        let shares = score_topics(&target, &topics).unwrap().shares();
        let sum: f64 = shares.iter().map(|(_, s)| s).sum();

        assert!((sum - 1.0).abs() < 1e-9);
        assert!((shares[0].1 - 0.75).abs() < 1e-9);
    }
}

//! Word frequency counting and ranked frequency tables

use crate::config::FrequencyConfig;
use crate::processing::text_processor::TextProcessor;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A closed list of words excluded from frequency counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyOptions {
    pub include_bigrams: bool,
    pub apply_stopwords: bool,
    pub alphabetic_only: bool,
}

impl Default for FrequencyOptions {
    fn default() -> Self {
        Self {
            include_bigrams: false,
            apply_stopwords: true,
            alphabetic_only: false,
        }
    }
}

impl From<&FrequencyConfig> for FrequencyOptions {
    fn from(config: &FrequencyConfig) -> Self {
        Self {
            include_bigrams: config.include_bigrams,
            apply_stopwords: config.apply_stopwords,
            alphabetic_only: config.alphabetic_only,
        }
    }
}

/// Word counts ranked by descending count, ties in alphabetical order.
///
/// Serializes as a JSON object whose keys keep the ranked order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn from_counts(counts: HashMap<String, usize>) -> Self {
        let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(word, count)| (word.as_str(), *count))
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.entries.iter().find(|(w, _)| w == word).map(|(_, c)| *c)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn words(&self) -> HashSet<&str> {
        self.entries.iter().map(|(w, _)| w.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// The `n` highest-ranked entries.
    pub fn top(&self, n: usize) -> Self {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    /// One `word: count` line per entry, highest count first.
    pub fn to_listing(&self) -> String {
        self.entries
            .iter()
            .map(|(word, count)| format!("{}: {}\n", word, count))
            .collect()
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, count) in &self.entries {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FrequencyTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = FrequencyTable;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of words to occurrence counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut counts = HashMap::new();
                while let Some((word, count)) = access.next_entry::<String, usize>()? {
                    *counts.entry(word).or_insert(0) += count;
                }
                Ok(FrequencyTable::from_counts(counts))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

pub struct FrequencyAnalyzer {
    options: FrequencyOptions,
    stop_words: StopWords,
}

impl FrequencyAnalyzer {
    pub fn new(options: FrequencyOptions, stop_words: StopWords) -> Self {
        Self { options, stop_words }
    }

    pub fn analyze(&self, text: &str) -> FrequencyTable {
        self.analyze_corpus(std::iter::once(text))
    }

    /// Count words across several texts. Bigrams never span two texts.
    pub fn analyze_corpus<'a, I>(&self, texts: I) -> FrequencyTable
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tokens: Vec<String> = Vec::new();
        let mut bigrams: Vec<String> = Vec::new();

        for text in texts {
            let mut doc_tokens = TextProcessor::tokenize(text);
            if self.options.include_bigrams {
                // Pairs come from the unfiltered sequence so that dropping a
                // token never makes its neighbours adjacent.
                let keep = |t: &String| !self.options.alphabetic_only || TextProcessor::is_alphabetic_token(t);
                bigrams.extend(
                    doc_tokens
                        .windows(2)
                        .filter(|pair| keep(&pair[0]) && keep(&pair[1]))
                        .map(|pair| format!("{} {}", pair[0], pair[1])),
                );
            }
            if self.options.alphabetic_only {
                doc_tokens.retain(|t| TextProcessor::is_alphabetic_token(t));
            }
            tokens.extend(doc_tokens);
        }

        let mut vocabulary: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        if self.options.apply_stopwords {
            vocabulary.retain(|word| !self.stop_words.contains(word));
        }

        let mut counts: HashMap<String, usize> = HashMap::with_capacity(vocabulary.len());
        for token in tokens.iter().chain(bigrams.iter()) {
            if vocabulary.contains(token.as_str()) || self.is_counted_bigram(token) {
                *counts.entry(token.clone()).or_insert(0) += 1;
            }
        }

        FrequencyTable::from_counts(counts)
    }

    fn is_counted_bigram(&self, token: &str) -> bool {
        self.options.include_bigrams
            && token.contains(' ')
            && !(self.options.apply_stopwords && self.stop_words.contains(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(options: FrequencyOptions, stop: &[&str]) -> FrequencyAnalyzer {
        FrequencyAnalyzer::new(options, StopWords::new(stop.iter().copied()))
    }

    #[test]
    fn test_counts_with_stop_words_removed() {
        let table = analyzer(FrequencyOptions::default(), &["the"]).analyze("cat cat dog the the");

        assert_eq!(
            table.entries(),
            &[("cat".to_string(), 2), ("dog".to_string(), 1)]
        );
    }

    #[test]
    fn test_exact_token_counting() {
        // "cat" must not be counted inside "cats".
        let table = analyzer(FrequencyOptions::default(), &[]).analyze("cat cats cats");
        assert_eq!(table.get("cat"), Some(1));
        assert_eq!(table.get("cats"), Some(2));
    }

    #[test]
    fn test_case_folding() {
        let table = analyzer(FrequencyOptions::default(), &["the"]).analyze("Energy ENERGY energy The");
        assert_eq!(table.entries(), &[("energy".to_string(), 3)]);
    }

    #[test]
    fn test_ties_are_alphabetical() {
        let table = analyzer(FrequencyOptions::default(), &[]).analyze("pear apple fig apple pear fig");
        let words: Vec<&str> = table.iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["apple", "fig", "pear"]);
    }

    #[test]
    fn test_conservation_under_filtering() {
        let text = "the cell wall of the plant cell is made of cellulose and the cell membrane";
        let stop = ["the", "of", "is", "and"];

        let unfiltered = analyzer(
            FrequencyOptions { apply_stopwords: false, ..FrequencyOptions::default() },
            &stop,
        )
        .analyze(text);
        let filtered = analyzer(FrequencyOptions::default(), &stop).analyze(text);

        let removed: usize = stop.iter().filter_map(|w| unfiltered.get(w)).sum();
        assert_eq!(unfiltered.total(), filtered.total() + removed);
    }

    #[test]
    fn test_bigrams_merge_into_table() {
        let options = FrequencyOptions { include_bigrams: true, ..FrequencyOptions::default() };
        let table = analyzer(options, &["the"]).analyze("the cell wall the cell wall");

        assert_eq!(table.get("cell wall"), Some(2));
        assert_eq!(table.get("the cell"), Some(2));
        assert_eq!(table.get("wall the"), Some(1));
        assert_eq!(table.get("cell"), Some(2));
        assert_eq!(table.get("the"), None);
    }

    #[test]
    fn test_bigrams_do_not_span_documents() {
        let options = FrequencyOptions { include_bigrams: true, ..FrequencyOptions::default() };
        let table = analyzer(options, &[]).analyze_corpus(["alpha beta", "gamma delta"]);

        assert_eq!(table.get("alpha beta"), Some(1));
        assert_eq!(table.get("gamma delta"), Some(1));
        assert_eq!(table.get("beta gamma"), None);
    }

    #[test]
    fn test_alphabetic_only_drops_markers_and_numbers() {
        let options = FrequencyOptions { alphabetic_only: true, ..FrequencyOptions::default() };
        let table = analyzer(options, &[]).analyze("(a) Explain 2 marks ______ explain");

        assert_eq!(table.entries(), &[("explain".to_string(), 2), ("marks".to_string(), 1)]);
    }

    #[test]
    fn test_filtered_tokens_do_not_join_their_neighbours() {
        let options = FrequencyOptions {
            include_bigrams: true,
            alphabetic_only: true,
            apply_stopwords: false,
        };
        let table = analyzer(options, &[]).analyze("(a) Explain 2 marks for each answer");

        assert_eq!(table.get("explain marks"), None);
        assert_eq!(table.get("2 marks"), None);
        assert_eq!(table.get("marks for"), Some(1));
        assert_eq!(table.get("each answer"), Some(1));
    }

    #[test]
    fn test_counts_are_never_zero() {
        let table = analyzer(FrequencyOptions::default(), &["a"]).analyze("a b c b");
        assert!(table.iter().all(|(_, count)| count > 0));
    }

    #[test]
    fn test_structured_output_keeps_rank_order_and_parses_back() {
        let table = analyzer(FrequencyOptions::default(), &[]).analyze("zebra zebra apple");

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"zebra":2,"apple":1}"#);

        let parsed: FrequencyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_listing_and_top() {
        let table = analyzer(FrequencyOptions::default(), &[]).analyze("b a b c b a");
        assert_eq!(table.to_listing(), "b: 3\na: 2\nc: 1\n");
        assert_eq!(table.top(1).entries(), &[("b".to_string(), 3)]);
    }
}

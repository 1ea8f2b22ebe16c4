//! Text preprocessing and tokenization

use regex::Regex;

pub struct TextProcessor {
    answer_blank_regex: Regex,
    whitespace_run_regex: Regex,
    break_on_question_mark: bool,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TextProcessor {
    pub fn new(break_on_question_mark: bool) -> Self {
        // Answer blanks in exam papers are printed as long underscore runs.
        let answer_blank_regex = Regex::new(r"_{3,}").expect("Invalid answer blank regex");

        let whitespace_run_regex = Regex::new(r"\s{4,}").expect("Invalid whitespace regex");

        Self {
            answer_blank_regex,
            whitespace_run_regex,
            break_on_question_mark,
        }
    }

    /// Normalize raw extracted text before segmentation.
    ///
    /// Steps, in order: drop carriage returns and turn line breaks into
    /// spaces, replace answer blanks with a newline, collapse runs of four or
    /// more whitespace characters, and optionally break after each `?`.
    pub fn preprocess(&self, text: &str) -> String {
        let joined = text.replace('\r', "").replace('\n', " ");

        let cleaned = self.answer_blank_regex.replace_all(&joined, "\n");
        let collapsed = self.whitespace_run_regex.replace_all(&cleaned, " ");

        if self.break_on_question_mark {
            collapsed.replace('?', "?\n")
        } else {
            collapsed.into_owned()
        }
    }

    /// Split on whitespace, lowercasing each token.
    pub fn tokenize(text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Tokens made only of letters, with no answer-blank residue.
    pub fn is_alphabetic_token(token: &str) -> bool {
        !token.contains("___") && !token.is_empty() && token.chars().all(char::is_alphabetic)
    }
}

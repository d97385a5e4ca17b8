//! Text cleaning and tokenization

use crate::config::ProcessingConfig;
use crate::error::Result;
use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    stop_words: HashSet<String>,
    min_token_length: usize,
    url_regex: Regex,
    disallowed_regex: Regex,
    digit_regex: Regex,
}

#[derive(Debug, Clone)]
pub struct ProcessedText {
    pub cleaned: String,
    pub tokens: Vec<String>,
}

impl ProcessedText {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Distinct tokens
    pub fn vocabulary(&self) -> HashSet<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new(&ProcessingConfig::default()).expect("Failed to create default text processor")
    }
}

impl TextProcessor {
    pub fn new(config: &ProcessingConfig) -> Result<Self> {
        let stop_words = config
            .stop_words
            .iter()
            .map(|w| w.to_lowercase())
            .collect();

        Ok(Self {
            stop_words,
            min_token_length: config.min_token_length,
            url_regex: Regex::new(r"http\S+")?,
            disallowed_regex: Regex::new(r"[^a-zA-Z0-9\s.,;:!?\-&]")?,
            digit_regex: Regex::new(r"[0-9]+")?,
        })
    }

    /// Clean text and split it into scoring tokens
    pub fn process(&self, text: &str) -> ProcessedText {
        let stripped = self.strip(text);
        let tokens = self.tokenize(&stripped);
        let cleaned = tokens.join(" ");

        ProcessedText { cleaned, tokens }
    }

    /// Cleaned form of `text`: filtered tokens joined by single spaces.
    ///
    /// Cleaning its own output returns it unchanged.
    pub fn clean_text(&self, text: &str) -> String {
        self.process(text).cleaned
    }

    /// Lowercase word tokens minus stop words and short tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        lowered
            .unicode_words()
            .filter(|word| word.chars().count() > self.min_token_length)
            .filter(|word| !self.stop_words.contains(*word))
            .map(str::to_string)
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// URLs, foreign characters, punctuation and digits removed
    fn strip(&self, text: &str) -> String {
        let without_urls = self.url_regex.replace_all(text, "");
        let allowed = self.disallowed_regex.replace_all(&without_urls, "");
        let without_punct: String = allowed
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        self.digit_regex.replace_all(&without_punct, "").into_owned()
    }
}

//! # Text Normalization
//!
//! Cleans raw social media text and splits it into tokens ready for
//! polarity scoring.

use super::record::{NormalizedRecord, Record};
use super::stopwords::{Language, StopWords};
use crate::error::{Error, Result};
use crate::sentiment::Lexicon;
use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use unicode_normalization::UnicodeNormalization;

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+|www\.\S+").unwrap());
static MENTION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").unwrap());
static HASHTAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w+)").unwrap());

/// Text normalizer for social media posts
///
/// Steps, in order:
/// 1. Unicode normalization (NFC)
/// 2. Remove URLs and @mentions
/// 3. Drop the `#` of hashtags, keeping the word
/// 4. Lowercase
/// 5. Strip punctuation and digits from every whitespace-separated chunk,
///    unless the chunk is a known emoticon
/// 6. Remove stop words
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    /// Stop words to remove
    stop_words: Arc<StopWords>,
    /// Chunks kept verbatim (lowercased, NFC)
    emoticons: HashSet<String>,
}

impl TextNormalizer {
    /// Create a normalizer with the given stop words and no emoticons
    pub fn new(stop_words: Arc<StopWords>) -> Self {
        Self {
            stop_words,
            emoticons: HashSet::new(),
        }
    }

    /// Normalizer with the built-in stop words and lexicon emoticons of a
    /// language
    pub fn for_language(language: Language) -> Self {
        let lexicon = Lexicon::for_language(language);
        Self::new(Arc::new(StopWords::for_language(language))).with_emoticons(lexicon.emoticons())
    }

    /// Keep these chunks whole instead of stripping their punctuation
    pub fn with_emoticons<I, S>(mut self, emoticons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.emoticons.extend(
            emoticons
                .into_iter()
                .map(|e| e.as_ref().nfc().collect::<String>().to_lowercase()),
        );
        self
    }

    /// Clean text without removing stop words.
    ///
    /// The result is the surviving chunks joined by a single space.
    pub fn clean(&self, text: &str) -> String {
        let normalized: String = text.nfc().collect();

        let no_urls = URL_REGEX.replace_all(&normalized, " ");
        let no_mentions = MENTION_REGEX.replace_all(&no_urls, " ");
        let no_hashtags = HASHTAG_REGEX.replace_all(&no_mentions, "${1}");

        let lowercase = no_hashtags.to_lowercase();

        lowercase
            .split_whitespace()
            .filter_map(|chunk| self.clean_chunk(chunk))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn clean_chunk(&self, chunk: &str) -> Option<String> {
        if self.emoticons.contains(chunk) {
            return Some(chunk.to_string());
        }

        let word: String = chunk.chars().filter(|c| c.is_alphabetic()).collect();
        if word.is_empty() {
            None
        } else {
            Some(word)
        }
    }

    /// Split cleaned text into tokens, dropping stop words
    pub fn tokenize(&self, cleaned: &str) -> Vec<String> {
        cleaned
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(token))
            .map(String::from)
            .collect()
    }

    /// Normalize a record.
    ///
    /// Fails with [`Error::EmptyInput`] when no token survives; what to do
    /// with such a record is up to the caller.
    pub fn normalize(&self, record: &Record) -> Result<NormalizedRecord> {
        let cleaned_text = self.clean(&record.text);
        let tokens = self.tokenize(&cleaned_text);

        if tokens.is_empty() {
            return Err(Error::EmptyInput {
                id: record.id.clone(),
            });
        }

        Ok(NormalizedRecord::new(record.clone(), cleaned_text, tokens))
    }
}

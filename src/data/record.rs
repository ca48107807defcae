//! # Records
//!
//! The values flowing through the pipeline: raw records, their normalized
//! form and their scored form. Each stage builds a new value from the
//! previous one.

use crate::sentiment::{PolarityScore, SentimentLabel, Thresholds};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One collected social media post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier
    pub id: String,
    /// Raw text as collected
    pub text: String,
    /// Publication timestamp
    pub timestamp: DateTime<Utc>,
    /// Author handle, when the source exposes it
    pub author: Option<String>,
}

impl Record {
    /// Create a new record stamped with the current time
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            timestamp: Utc::now(),
            author: None,
        }
    }

    /// Set timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// A record after text normalization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    record: Record,
    cleaned_text: String,
    tokens: Vec<String>,
}

impl NormalizedRecord {
    pub(crate) fn new(record: Record, cleaned_text: String, tokens: Vec<String>) -> Self {
        Self {
            record,
            cleaned_text,
            tokens,
        }
    }

    /// The source record
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Cleaned text, before stop-word removal
    pub fn cleaned_text(&self) -> &str {
        &self.cleaned_text
    }

    /// Tokens in text order, stop-words removed
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// A normalized record with its sentiment
///
/// The label is always derived from the polarity, so the only way to build
/// one is through [`ScoredRecord::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    normalized: NormalizedRecord,
    polarity: f64,
    subjectivity: f64,
    label: SentimentLabel,
}

impl ScoredRecord {
    /// Attach a score to a normalized record, classifying it with `thresholds`
    pub fn new(normalized: NormalizedRecord, score: PolarityScore, thresholds: &Thresholds) -> Self {
        Self {
            normalized,
            polarity: score.polarity,
            subjectivity: score.subjectivity,
            label: thresholds.classify(score.polarity),
        }
    }

    pub fn normalized(&self) -> &NormalizedRecord {
        &self.normalized
    }

    pub fn record(&self) -> &Record {
        self.normalized.record()
    }

    pub fn id(&self) -> &str {
        &self.normalized.record().id
    }

    pub fn tokens(&self) -> &[String] {
        self.normalized.tokens()
    }

    /// Polarity in [-1, 1]
    pub fn polarity(&self) -> f64 {
        self.polarity
    }

    /// Subjectivity in [0, 1]
    pub fn subjectivity(&self) -> f64 {
        self.subjectivity
    }

    pub fn label(&self) -> SentimentLabel {
        self.label
    }
}

/// A record left out of the summary, with the reason
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub id: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_builder() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let record = Record::new("1", "Adorei o produto")
            .with_timestamp(ts)
            .with_author("user1");

        assert_eq!(record.id, "1");
        assert_eq!(record.timestamp, ts);
        assert_eq!(record.author.as_deref(), Some("user1"));
    }

    #[test]
    fn test_scored_record_label_follows_polarity() {
        let normalized = NormalizedRecord::new(
            Record::new("1", "bom"),
            "bom".to_string(),
            vec!["bom".to_string()],
        );
        let score = PolarityScore {
            polarity: 0.5,
            subjectivity: 1.0,
        };
        let scored = ScoredRecord::new(normalized, score, &Thresholds::default());

        assert_eq!(scored.label(), SentimentLabel::Positive);
        assert_eq!(scored.id(), "1");
        assert_eq!(scored.tokens(), ["bom"]);
    }
}

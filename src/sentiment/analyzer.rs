//! # Sentiment Analyzer
//!
//! Labels, classification thresholds and the per-record analysis combining
//! the normalizer with a polarity scorer.

use super::scorer::{PolarityScore, PolarityScorer};
use crate::data::{Record, ScoredRecord, TextNormalizer};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-way sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// All labels, in reporting order
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity thresholds separating the three labels
///
/// Polarity strictly above `positive` is positive, strictly below
/// `negative` is negative, anything in between (bounds included) is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    positive: f64,
    negative: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            positive: crate::defaults::POSITIVE_THRESHOLD,
            negative: crate::defaults::NEGATIVE_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Create validated thresholds.
    ///
    /// Both must be finite, within [-1, 1], and `negative <= positive`.
    pub fn new(positive: f64, negative: f64) -> Result<Self> {
        for (name, value) in [("positive", positive), ("negative", negative)] {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(Error::config(format!(
                    "{} threshold must be within [-1, 1], got {}",
                    name, value
                )));
            }
        }
        if negative > positive {
            return Err(Error::config(format!(
                "negative threshold {} is above positive threshold {}",
                negative, positive
            )));
        }
        Ok(Self { positive, negative })
    }

    /// Neutral band `[-band, band]` around zero
    pub fn symmetric(band: f64) -> Result<Self> {
        Self::new(band, -band)
    }

    pub fn positive(&self) -> f64 {
        self.positive
    }

    pub fn negative(&self) -> f64 {
        self.negative
    }

    /// Classify a polarity value
    pub fn classify(&self, polarity: f64) -> SentimentLabel {
        if polarity > self.positive {
            SentimentLabel::Positive
        } else if polarity < self.negative {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Normalizes, scores and labels records
pub struct SentimentAnalyzer {
    /// Text normalizer
    normalizer: TextNormalizer,
    /// Polarity scorer picked at startup
    scorer: Box<dyn PolarityScorer>,
    /// Label thresholds
    thresholds: Thresholds,
}

impl SentimentAnalyzer {
    /// Create an analyzer from its parts
    pub fn new(
        normalizer: TextNormalizer,
        scorer: Box<dyn PolarityScorer>,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            normalizer,
            scorer,
            thresholds,
        }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Score a token sequence
    pub fn score(&self, tokens: &[String]) -> PolarityScore {
        self.scorer.score(tokens)
    }

    /// Classify a polarity with the configured thresholds
    pub fn classify(&self, polarity: f64) -> SentimentLabel {
        self.thresholds.classify(polarity)
    }

    /// Analyze one record.
    ///
    /// Propagates [`Error::EmptyInput`] from the normalizer untouched.
    pub fn analyze(&self, record: &Record) -> Result<ScoredRecord> {
        let normalized = self.normalizer.normalize(record)?;
        let score = self.scorer.score(normalized.tokens());

        tracing::debug!(
            id = %record.id,
            polarity = score.polarity,
            subjectivity = score.subjectivity,
            "Scored record"
        );

        Ok(ScoredRecord::new(normalized, score, &self.thresholds))
    }

    /// Analyze multiple records, keeping one result per input in order
    pub fn analyze_batch(&self, records: &[Record]) -> Vec<Result<ScoredRecord>> {
        records.iter().map(|record| self.analyze(record)).collect()
    }
}

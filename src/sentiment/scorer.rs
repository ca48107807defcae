//! # Polarity Scorers
//!
//! Turn a token sequence into polarity and subjectivity. The concrete
//! scorer is picked once at startup from configuration.

use super::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Polarity and subjectivity of a token sequence
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScore {
    /// Sentiment direction and strength (-1 to 1)
    pub polarity: f64,
    /// Share of opinion-bearing tokens (0 to 1)
    pub subjectivity: f64,
}

/// Trait for polarity scorers
pub trait PolarityScorer: Send + Sync {
    /// Score a token sequence. An empty sequence scores 0 / 0.
    fn score(&self, tokens: &[String]) -> PolarityScore;

    /// Scorer name, for logs and reports
    fn name(&self) -> &str;
}

/// Available scorer variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    /// Average lexicon weight over all tokens
    #[default]
    Lexicon,
    /// Lexicon average shifted toward the side with more opinion words
    CountBoost,
}

impl ScorerKind {
    /// Build the scorer for this variant
    pub fn build(self, lexicon: Arc<Lexicon>, boost: f64) -> Box<dyn PolarityScorer> {
        match self {
            ScorerKind::Lexicon => Box::new(LexiconScorer::new(lexicon)),
            ScorerKind::CountBoost => Box::new(CountBoostScorer::new(lexicon, boost)),
        }
    }
}

/// Lexicon hit statistics for one token sequence
#[derive(Debug, Clone, Copy, Default)]
struct LexiconHits {
    sum: f64,
    found: usize,
    positive: usize,
    negative: usize,
    total: usize,
}

impl LexiconHits {
    fn collect(lexicon: &Lexicon, tokens: &[String]) -> Self {
        let mut hits = Self {
            total: tokens.len(),
            ..Self::default()
        };

        for token in tokens {
            if let Some(weight) = lexicon.get_score(token) {
                hits.sum += weight;
                hits.found += 1;
                if weight > 0.0 {
                    hits.positive += 1;
                } else if weight < 0.0 {
                    hits.negative += 1;
                }
            }
        }

        hits
    }

    fn polarity(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.sum / self.total as f64).clamp(-1.0, 1.0)
    }

    fn subjectivity(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.found as f64 / self.total as f64).clamp(0.0, 1.0)
    }
}

/// Scores tokens by averaging lexicon weights.
///
/// Unknown tokens count as 0 in the average, so
/// `["amo", "produto", "incrível"]` with weights 0.8 / - / 0.9 gives
/// (0.8 + 0 + 0.9) / 3.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: Arc<Lexicon>,
}

impl LexiconScorer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, tokens: &[String]) -> PolarityScore {
        let hits = LexiconHits::collect(&self.lexicon, tokens);
        PolarityScore {
            polarity: hits.polarity(),
            subjectivity: hits.subjectivity(),
        }
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

/// Lexicon average nudged by opinion word counts.
///
/// When positive-weight tokens outnumber negative-weight ones the polarity
/// is raised by `boost`, and lowered by `boost` in the opposite case.
#[derive(Debug, Clone)]
pub struct CountBoostScorer {
    lexicon: Arc<Lexicon>,
    boost: f64,
}

impl CountBoostScorer {
    pub fn new(lexicon: Arc<Lexicon>, boost: f64) -> Self {
        Self {
            lexicon,
            boost: boost.clamp(0.0, 1.0),
        }
    }
}

impl PolarityScorer for CountBoostScorer {
    fn score(&self, tokens: &[String]) -> PolarityScore {
        let hits = LexiconHits::collect(&self.lexicon, tokens);

        let shift = match hits.positive.cmp(&hits.negative) {
            std::cmp::Ordering::Greater => self.boost,
            std::cmp::Ordering::Less => -self.boost,
            std::cmp::Ordering::Equal => 0.0,
        };

        PolarityScore {
            polarity: (hits.polarity() + shift).clamp(-1.0, 1.0),
            subjectivity: hits.subjectivity(),
        }
    }

    fn name(&self) -> &str {
        "count_boost"
    }
}

//! # Sentiment Module
//!
//! Lexicons, polarity scorers, classification and aggregation.

mod aggregator;
mod analyzer;
mod lexicon;
mod scorer;

pub use aggregator::{
    DailySentiment, DescriptiveStats, Extreme, LabelShare, SentimentAggregator, Summary,
    TokenCount,
};
pub use analyzer::{SentimentAnalyzer, SentimentLabel, Thresholds};
pub use lexicon::Lexicon;
pub use scorer::{CountBoostScorer, LexiconScorer, PolarityScore, PolarityScorer, ScorerKind};

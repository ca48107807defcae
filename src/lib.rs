//! # Brand Sentiment
//!
//! Sentiment analysis of social media posts about a brand.
//!
//! ## Modules
//!
//! - `data` - Records, text normalization, stop words, CSV import/export
//! - `sentiment` - Lexicons, polarity scorers, classification, aggregation
//! - `pipeline` - Runs a batch of records through every stage
//! - `report` - Plain-text report with insights and recommendations
//! - `utils` - Configuration and logging
//!
//! ## Example Usage
//!
//! ```no_run
//! use brand_sentiment::{sample_records, Pipeline, ReportGenerator};
//!
//! let pipeline = Pipeline::default();
//! let output = pipeline.run(&sample_records());
//!
//! for scored in &output.scored {
//!     println!("{} {:.3} {}", scored.id(), scored.polarity(), scored.label());
//! }
//!
//! let report = ReportGenerator::new("Marca").render_text(&output.summary, chrono::Utc::now());
//! println!("{}", report);
//! ```

pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod utils;

// Re-exports for convenience
pub use data::{
    sample_records, Language, LoadedRecords, NormalizedRecord, Record, ScoredRecord,
    SkippedRecord, StopWords, TextNormalizer,
};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineConfig, PipelineOutput};
pub use report::ReportGenerator;
pub use sentiment::{
    CountBoostScorer, DescriptiveStats, Lexicon, LexiconScorer, PolarityScore, PolarityScorer,
    ScorerKind, SentimentAggregator, SentimentAnalyzer, SentimentLabel, Summary, Thresholds,
};
pub use utils::{load_config, save_config, AppConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Polarity strictly above this is positive
    pub const POSITIVE_THRESHOLD: f64 = 0.1;

    /// Polarity strictly below this is negative
    pub const NEGATIVE_THRESHOLD: f64 = -0.1;

    /// Tokens kept per label in a summary
    pub const TOP_N: usize = 10;

    /// Polarity shift of the count-boost scorer
    pub const COUNT_BOOST: f64 = 0.3;
}

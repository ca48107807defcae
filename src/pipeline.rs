//! # Pipeline
//!
//! Wires normalizer, scorer, classifier and aggregator together and runs
//! them over a batch of records.

use crate::data::{
    Language, LoadedRecords, Record, ScoredRecord, SkippedRecord, StopWords, TextNormalizer,
};
use crate::error::{Error, Result};
use crate::sentiment::{
    Lexicon, ScorerKind, SentimentAggregator, SentimentAnalyzer, Summary, Thresholds,
};
use crate::utils::AppConfig;
use std::sync::Arc;

/// Immutable settings shared by every stage of a run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub language: Language,
    pub stop_words: Arc<StopWords>,
    pub lexicon: Arc<Lexicon>,
    pub thresholds: Thresholds,
    pub scorer: ScorerKind,
    /// Only used by [`ScorerKind::CountBoost`]
    pub count_boost: f64,
    pub top_n: usize,
}

impl PipelineConfig {
    /// Built-in stop words and lexicon for a language, default thresholds
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            stop_words: Arc::new(StopWords::for_language(language)),
            lexicon: Arc::new(Lexicon::for_language(language)),
            thresholds: Thresholds::default(),
            scorer: ScorerKind::default(),
            count_boost: crate::defaults::COUNT_BOOST,
            top_n: crate::defaults::TOP_N,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::for_language(Language::Portuguese)
    }
}

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Scored records, in input order
    pub scored: Vec<ScoredRecord>,
    /// Records dropped while loading or before scoring
    pub skipped: Vec<SkippedRecord>,
    /// Summary over `scored`
    pub summary: Summary,
}

/// Sentiment pipeline
pub struct Pipeline {
    analyzer: SentimentAnalyzer,
    aggregator: SentimentAggregator,
}

impl Pipeline {
    /// Build the pipeline stages from a resolved configuration
    pub fn new(config: PipelineConfig) -> Self {
        let normalizer = TextNormalizer::new(Arc::clone(&config.stop_words))
            .with_emoticons(config.lexicon.emoticons());
        let scorer = config
            .scorer
            .build(Arc::clone(&config.lexicon), config.count_boost);

        Self {
            analyzer: SentimentAnalyzer::new(normalizer, scorer, config.thresholds),
            aggregator: SentimentAggregator::new(config.top_n),
        }
    }

    /// Resolve an application config and build the pipeline
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(config.resolve()?))
    }

    pub fn analyzer(&self) -> &SentimentAnalyzer {
        &self.analyzer
    }

    pub fn aggregator(&self) -> &SentimentAggregator {
        &self.aggregator
    }

    /// Analyze a batch and summarize what survived.
    ///
    /// Records that normalize to nothing are skipped with a warning and
    /// listed in [`PipelineOutput::skipped`].
    pub fn run(&self, records: &[Record]) -> PipelineOutput {
        tracing::info!(
            count = records.len(),
            scorer = self.analyzer.scorer_name(),
            "Analyzing records"
        );

        let mut scored = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();

        for (record, result) in records.iter().zip(self.analyzer.analyze_batch(records)) {
            match result {
                Ok(scored_record) => scored.push(scored_record),
                Err(err) => {
                    if matches!(err, Error::EmptyInput { .. }) {
                        tracing::warn!(id = %record.id, "Skipping record with no tokens");
                    } else {
                        tracing::warn!(id = %record.id, error = %err, "Skipping record");
                    }
                    skipped.push(SkippedRecord {
                        id: record.id.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let summary = self.aggregator.summarize(&scored);

        tracing::info!(
            scored = scored.len(),
            skipped = skipped.len(),
            dominant = ?summary.dominant,
            "Analysis complete"
        );

        PipelineOutput {
            scored,
            skipped,
            summary,
        }
    }

    /// Run over loaded records, listing rows rejected by the collector
    /// ahead of the records skipped during analysis
    pub fn run_loaded(&self, loaded: &LoadedRecords) -> PipelineOutput {
        let mut output = self.run(&loaded.records);
        output.skipped.splice(0..0, loaded.rejected.iter().cloned());
        output
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_records;
    use crate::sentiment::SentimentLabel;

    #[test]
    fn test_run_skips_empty_records() {
        let records = vec![
            Record::new("1", "Amo este produto, é incrível!"),
            Record::new("2", "https://t.co/abc @marca"),
            Record::new("3", "Atendimento péssimo, muito caro"),
        ];
        let output = Pipeline::default().run(&records);

        assert_eq!(output.scored.len(), 2);
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].id, "2");
        assert_eq!(output.summary.total, 2);
        assert_eq!(output.scored[0].id(), "1");
        assert_eq!(output.scored[0].label(), SentimentLabel::Positive);
        assert_eq!(output.scored[1].label(), SentimentLabel::Negative);
    }

    #[test]
    fn test_emoticons_survive_normalization() {
        let output = Pipeline::default().run(&[Record::new("1", "chegou hoje :)")]);
        let scored = &output.scored[0];
        assert!(scored.tokens().iter().any(|t| t == ":)"));
        assert_eq!(scored.label(), SentimentLabel::Positive);
    }

    #[test]
    fn test_sample_run() {
        let output = Pipeline::default().run(&sample_records());
        assert!(output.skipped.is_empty());
        assert_eq!(output.summary.total, 10);

        let points: u32 = output.summary.labels.values().map(|s| s.basis_points).sum();
        assert_eq!(points, 10_000);
    }

    #[test]
    fn test_run_loaded_lists_rejected_rows_first() {
        let loaded = LoadedRecords {
            records: vec![Record::new("1", "Amo!"), Record::new("2", "@marca")],
            rejected: vec![SkippedRecord {
                id: "0".to_string(),
                reason: "bad timestamp".to_string(),
            }],
        };
        let output = Pipeline::default().run_loaded(&loaded);

        assert_eq!(output.summary.total, 1);
        let ids: Vec<&str> = output.skipped.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["0", "2"]);
    }

    #[test]
    fn test_empty_batch() {
        let output = Pipeline::default().run(&[]);
        assert!(output.scored.is_empty());
        assert!(output.summary.polarity.is_none());
    }
}

//! Integration tests for Brand Sentiment

use brand_sentiment::{
    // Data
    sample_records, Language, Record, StopWords, TextNormalizer,
    // Sentiment
    Lexicon, LexiconScorer, PolarityScorer, ScorerKind, SentimentAggregator, SentimentAnalyzer,
    SentimentLabel, Thresholds,
    // Pipeline
    Pipeline, PipelineConfig, ReportGenerator,
    // Utils
    load_config, AppConfig, Error,
};
use approx::assert_relative_eq;
use std::sync::Arc;

fn scenario_lexicon() -> Arc<Lexicon> {
    Arc::new(Lexicon::new([("amo", 0.8), ("incrível", 0.9), ("caro", -0.4), ("péssimo", -0.9)]).unwrap())
}

fn scenario_analyzer() -> SentimentAnalyzer {
    SentimentAnalyzer::new(
        TextNormalizer::new(Arc::new(StopWords::for_language(Language::Portuguese))),
        Box::new(LexiconScorer::new(scenario_lexicon())),
        Thresholds::default(),
    )
}

mod normalization {
    use super::*;

    #[test]
    fn test_positive_post_tokens() {
        let normalizer = TextNormalizer::for_language(Language::Portuguese);
        let normalized = normalizer
            .normalize(&Record::new("1", "Amo este produto, é incrível!"))
            .unwrap();

        assert_eq!(normalized.tokens(), ["amo", "produto", "incrível"]);
    }

    #[test]
    fn test_decomposed_accents_match_composed() {
        let normalizer = TextNormalizer::for_language(Language::Portuguese);
        let composed = normalizer.normalize(&Record::new("1", "incrível")).unwrap();
        let decomposed = normalizer
            .normalize(&Record::new("2", "incri\u{301}vel"))
            .unwrap();

        assert_eq!(composed.tokens(), decomposed.tokens());
    }

    #[test]
    fn test_social_markup_removed() {
        let normalizer = TextNormalizer::for_language(Language::Portuguese);
        let normalized = normalizer
            .normalize(&Record::new(
                "1",
                "@loja #Adorei a entrega!!! 100% recomendo https://t.co/xyz",
            ))
            .unwrap();

        assert_eq!(normalized.tokens(), ["adorei", "entrega", "recomendo"]);
    }

    #[test]
    fn test_only_url_is_empty_input() {
        let normalizer = TextNormalizer::for_language(Language::Portuguese);
        let err = normalizer
            .normalize(&Record::new("url-only", "https://example.com/promo"))
            .unwrap_err();

        match err {
            Error::EmptyInput { id } => assert_eq!(id, "url-only"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let normalizer = TextNormalizer::for_language(Language::Portuguese);
        for record in sample_records() {
            let first = normalizer.normalize(&record).unwrap();
            let second = normalizer.normalize(&record).unwrap();
            assert_eq!(first, second);
        }
    }
}

mod scoring {
    use super::*;

    #[test]
    fn test_positive_scenario() {
        let scored = scenario_analyzer()
            .analyze(&Record::new("1", "Amo este produto, é incrível!"))
            .unwrap();

        assert_relative_eq!(scored.polarity(), 0.567, epsilon = 1e-3);
        assert_relative_eq!(scored.subjectivity(), 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(scored.label(), SentimentLabel::Positive);
    }

    #[test]
    fn test_scores_bounded_on_samples() {
        let lexicon = Arc::new(Lexicon::for_language(Language::Portuguese));
        let normalizer = TextNormalizer::for_language(Language::Portuguese);

        for kind in [ScorerKind::Lexicon, ScorerKind::CountBoost] {
            let scorer = kind.build(Arc::clone(&lexicon), 0.3);
            for record in sample_records() {
                let normalized = normalizer.normalize(&record).unwrap();
                let score = scorer.score(normalized.tokens());
                assert!((-1.0..=1.0).contains(&score.polarity), "{}", record.text);
                assert!((0.0..=1.0).contains(&score.subjectivity), "{}", record.text);
            }
        }
    }

    #[test]
    fn test_classify_uses_strict_bounds() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.classify(0.1), SentimentLabel::Neutral);
        assert_eq!(thresholds.classify(0.1000001), SentimentLabel::Positive);
        assert_eq!(thresholds.classify(-0.1000001), SentimentLabel::Negative);
    }

    #[test]
    fn test_empty_tokens_are_neutral() {
        let scorer = LexiconScorer::new(scenario_lexicon());
        let score = scorer.score(&[]);
        assert_eq!(score.polarity, 0.0);
        assert_eq!(score.subjectivity, 0.0);
        assert_eq!(Thresholds::default().classify(score.polarity), SentimentLabel::Neutral);
    }
}

mod aggregation {
    use super::*;

    fn posts(count: usize, text: &str, prefix: &str) -> Vec<Record> {
        (0..count)
            .map(|i| Record::new(format!("{prefix}{i}"), text))
            .collect()
    }

    fn six_three_one() -> Vec<Record> {
        let mut records = posts(6, "Amo, incrível", "p");
        records.extend(posts(3, "Péssimo e caro", "n"));
        records.extend(posts(1, "Produto entregue", "z"));
        records
    }

    #[test]
    fn test_six_three_one_percentages() {
        let analyzer = scenario_analyzer();
        let scored: Vec<_> = six_three_one()
            .iter()
            .map(|r| analyzer.analyze(r).unwrap())
            .collect();
        let summary = SentimentAggregator::default().summarize(&scored);

        assert_eq!(summary.percentage(SentimentLabel::Positive), 60.0);
        assert_eq!(summary.percentage(SentimentLabel::Negative), 30.0);
        assert_eq!(summary.percentage(SentimentLabel::Neutral), 10.0);
    }

    #[test]
    fn test_empty_collection() {
        let summary = SentimentAggregator::default().summarize(&[]);
        assert_eq!(summary.total, 0);
        for label in SentimentLabel::ALL {
            assert_eq!(summary.count(label), 0);
        }
        assert!(summary.polarity.is_none());
        assert!(summary.subjectivity.is_none());
    }

    #[test]
    fn test_permutation_gives_identical_summary() {
        let analyzer = scenario_analyzer();
        let mut records = six_three_one();
        records.push(Record::new("mixed", "Amo mas é caro"));
        let scored: Vec<_> = records.iter().map(|r| analyzer.analyze(r).unwrap()).collect();

        let mut reversed = scored.clone();
        reversed.reverse();

        let aggregator = SentimentAggregator::default();
        let a = aggregator.summarize(&scored);
        let b = aggregator.summarize(&reversed);

        assert_eq!(a.labels, b.labels);
        assert_eq!(a.polarity, b.polarity);
        assert_eq!(a.subjectivity, b.subjectivity);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let output = Pipeline::default().run(&sample_records());
        let points: u32 = output.summary.labels.values().map(|s| s.basis_points).sum();
        assert_eq!(points, 10_000);
    }
}

mod pipeline_and_export {
    use super::*;
    use brand_sentiment::data::storage;

    #[test]
    fn test_run_skips_and_lists_empty_records() {
        let records = vec![
            Record::new("a", "Amo este produto"),
            Record::new("b", "www.loja.com.br"),
            Record::new("c", "Que produto caro"),
        ];
        let output = Pipeline::default().run(&records);

        assert_eq!(output.summary.total, 2);
        assert_eq!(output.skipped.len(), 1);
        assert_eq!(output.skipped[0].id, "b");
    }

    #[test]
    fn test_export_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = Pipeline::default().run(&sample_records());

        let csv_path = dir.path().join("analyzed.csv");
        let json_path = dir.path().join("summary.json");
        storage::save_scored_records(&csv_path, &output.scored).unwrap();
        storage::save_summary(&json_path, &output.summary).unwrap();

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.headers().unwrap().len(), 9);
        assert_eq!(reader.records().count(), 10);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["total"], 10);
        assert!(json["labels"]["positive"]["count"].is_u64());
        assert!(json["polarity"]["mean"].is_f64());
    }

    #[test]
    fn test_collector_csv_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.csv");
        std::fs::write(
            &path,
            "id,text,created_at,author\n\
             1,Adorei o atendimento,2024-01-15 10:30:00,ana\n\
             2,Produto péssimo,2024-01-16T08:00:00Z,\n",
        )
        .unwrap();

        let loaded = storage::load_records(&path).unwrap();
        let output = Pipeline::default().run_loaded(&loaded);

        assert_eq!(output.summary.timeline.len(), 2);
        assert_eq!(output.summary.dominant, Some(SentimentLabel::Positive));
    }

    #[test]
    fn test_bad_collector_row_does_not_abort_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.csv");
        std::fs::write(
            &path,
            "id,text,created_at\n\
             1,Amo este produto,2024-01-15 10:30:00\n\
             2,Produto caro,yesterday\n\
             3,HTTPS://LOJA.COM.BR/PROMO,2024-01-15 11:00:00\n\
             4,Atendimento péssimo,2024-01-15 12:00:00\n",
        )
        .unwrap();

        let loaded = storage::load_records(&path).unwrap();
        let output = Pipeline::default().run_loaded(&loaded);

        assert_eq!(output.summary.total, 2);
        let skipped: Vec<&str> = output.skipped.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(skipped, ["2", "3"]);
    }

    #[test]
    fn test_report_for_sample() {
        let output = Pipeline::default().run(&sample_records());
        let report = ReportGenerator::new("Marca").render_text(&output.summary, chrono::Utc::now());

        assert!(report.contains("SENTIMENT REPORT - MARCA"));
        assert!(report.contains("Posts analyzed: 10"));
    }
}

mod config {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_file_drives_pipeline() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
[classification]
positive_threshold = 0.5
negative_threshold = -0.5

[lexicon.words]
"bacana" = 0.6
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        let pipeline = Pipeline::from_config(&config).unwrap();

        let output = pipeline.run(&[
            Record::new("1", "Produto bacana"),
            Record::new("2", "Amo, incrível, excelente"),
        ]);
        assert_eq!(output.scored[0].label(), SentimentLabel::Neutral);
        assert_eq!(output.scored[1].label(), SentimentLabel::Positive);
    }

    #[test]
    fn test_bad_config_fails_before_processing() {
        let mut config = AppConfig::default();
        config.classification.positive_threshold = f64::NAN;

        match Pipeline::from_config(&config) {
            Err(Error::ConfigError(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("invalid thresholds accepted"),
        }
    }

    #[test]
    fn test_english_pipeline() {
        let pipeline = Pipeline::new(PipelineConfig::for_language(Language::English));
        let output = pipeline.run(&[Record::new("1", "The support was excellent :)")]);
        assert_eq!(output.scored[0].label(), SentimentLabel::Positive);
    }
}

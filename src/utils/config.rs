//! Configuration utilities

use crate::data::{Language, StopWords};
use crate::error::{Error, Result};
use crate::pipeline::PipelineConfig;
use crate::sentiment::{Lexicon, ScorerKind, Thresholds};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Text normalization settings
    pub text: TextSettings,
    /// Lexicon and scorer settings
    pub lexicon: LexiconSettings,
    /// Label thresholds
    pub classification: ClassificationSettings,
    /// Aggregation settings
    pub summary: SummarySettings,
    /// Output settings
    pub output: OutputSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Text normalization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    /// Language of the posts; picks built-in stop words and lexicon
    pub language: Language,
    /// Stop-word file replacing the built-in list, one word per line
    pub stop_words_file: Option<PathBuf>,
    /// Words added on top of the stop-word list
    pub extra_stop_words: Vec<String>,
    /// Disable to keep every token
    pub remove_stop_words: bool,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            language: Language::Portuguese,
            stop_words_file: None,
            extra_stop_words: Vec::new(),
            remove_stop_words: true,
        }
    }
}

/// Lexicon and scorer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconSettings {
    /// Scorer variant
    pub scorer: ScorerKind,
    /// Polarity shift used by the `count_boost` scorer
    pub count_boost: f64,
    /// `token,weight` CSV replacing the built-in lexicon
    pub file: Option<PathBuf>,
    /// Inline entries added on top (override existing weights)
    pub words: BTreeMap<String, f64>,
}

impl Default for LexiconSettings {
    fn default() -> Self {
        Self {
            scorer: ScorerKind::default(),
            count_boost: crate::defaults::COUNT_BOOST,
            file: None,
            words: BTreeMap::new(),
        }
    }
}

/// Label thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationSettings {
    /// Polarity strictly above this is positive
    pub positive_threshold: f64,
    /// Polarity strictly below this is negative
    pub negative_threshold: f64,
}

impl Default for ClassificationSettings {
    fn default() -> Self {
        Self {
            positive_threshold: crate::defaults::POSITIVE_THRESHOLD,
            negative_threshold: crate::defaults::NEGATIVE_THRESHOLD,
        }
    }
}

/// Aggregation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarySettings {
    /// Tokens kept per label
    pub top_n: usize,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            top_n: crate::defaults::TOP_N,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory receiving the CSV, JSON and report files
    pub dir: PathBuf,
    /// Brand name used in file names and the report
    pub brand: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            brand: "brand".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    pub level: String,
    /// Include the event target in log lines
    pub with_target: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: false,
        }
    }
}

impl AppConfig {
    /// Validate the settings and load everything the pipeline needs.
    ///
    /// Reads the stop-word and lexicon files when configured. Any problem
    /// is reported as [`Error::ConfigError`] before a record is touched.
    pub fn resolve(&self) -> Result<PipelineConfig> {
        let language = self.text.language;

        let stop_words = if self.text.remove_stop_words {
            let mut stop_words = match &self.text.stop_words_file {
                Some(path) => StopWords::from_path(path)?,
                None => StopWords::for_language(language),
            };
            stop_words.extend(&self.text.extra_stop_words);
            stop_words
        } else {
            StopWords::none()
        };

        let mut lexicon = match &self.lexicon.file {
            Some(path) => Lexicon::from_csv_path(path)?,
            None => Lexicon::for_language(language),
        };
        lexicon.extend(self.lexicon.words.iter().map(|(token, weight)| (token, *weight)))?;

        let thresholds = Thresholds::new(
            self.classification.positive_threshold,
            self.classification.negative_threshold,
        )?;

        if self.summary.top_n == 0 {
            return Err(Error::config("summary.top_n must be at least 1"));
        }

        let boost = self.lexicon.count_boost;
        if !boost.is_finite() || !(0.0..=1.0).contains(&boost) {
            return Err(Error::config(format!(
                "lexicon.count_boost must be within [0, 1], got {}",
                boost
            )));
        }

        tracing::debug!(
            language = %language,
            stop_words = stop_words.len(),
            lexicon = lexicon.len(),
            scorer = ?self.lexicon.scorer,
            "Resolved configuration"
        );

        Ok(PipelineConfig {
            language,
            stop_words: Arc::new(stop_words),
            lexicon: Arc::new(lexicon),
            thresholds,
            scorer: self.lexicon.scorer,
            count_boost: boost,
            top_n: self.summary.top_n,
        })
    }
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

/// Load configuration from a `.toml` or `.json` file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;

    let config = match extension(path) {
        "json" => serde_json::from_str(&content)
            .map_err(|e| Error::config(format!("cannot parse {}: {}", path.display(), e)))?,
        "toml" => toml::from_str(&content)
            .map_err(|e| Error::config(format!("cannot parse {}: {}", path.display(), e)))?,
        ext => {
            return Err(Error::config(format!(
                "unsupported config format '{}'",
                ext
            )))
        }
    };

    tracing::info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Save configuration to a `.toml` or `.json` file
pub fn save_config<P: AsRef<Path>>(config: &AppConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    let content = match extension(path) {
        "json" => serde_json::to_string_pretty(config)?,
        "toml" => toml::to_string_pretty(config)
            .map_err(|e| Error::config(format!("cannot serialize config: {}", e)))?,
        ext => {
            return Err(Error::config(format!(
                "unsupported config format '{}'",
                ext
            )))
        }
    };

    std::fs::write(path, content)?;
    Ok(())
}

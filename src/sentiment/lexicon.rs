//! # Sentiment Lexicon
//!
//! Token to signed weight mapping used by the polarity scorers.

use crate::data::Language;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

const PORTUGUESE_POSITIVE: &[(&str, f64)] = &[
    ("bom", 0.5),
    ("boa", 0.5),
    ("ótimo", 0.8),
    ("ótima", 0.8),
    ("excelente", 0.9),
    ("fantástico", 0.9),
    ("fantástica", 0.9),
    ("incrível", 0.9),
    ("maravilhoso", 0.9),
    ("maravilhosa", 0.9),
    ("perfeito", 0.9),
    ("perfeita", 0.9),
    ("perfeitos", 0.9),
    ("perfeitas", 0.9),
    ("adoro", 0.8),
    ("adorei", 0.8),
    ("amo", 0.8),
    ("gosto", 0.5),
    ("recomendo", 0.7),
    ("satisfeito", 0.6),
    ("satisfeita", 0.6),
    ("feliz", 0.7),
    ("alegre", 0.6),
    ("contente", 0.6),
    ("impressionado", 0.6),
    ("impressionada", 0.6),
    ("surpreendente", 0.7),
    ("genial", 0.8),
    ("brilhante", 0.8),
    ("espetacular", 0.9),
    ("magnífico", 0.9),
    ("delicioso", 0.8),
    ("deliciosa", 0.8),
    ("saboroso", 0.7),
    ("saborosa", 0.7),
    ("gostoso", 0.7),
    ("gostosa", 0.7),
    ("lindo", 0.7),
    ("linda", 0.7),
    ("melhor", 0.5),
    ("melhores", 0.6),
    ("inovando", 0.4),
    ("prático", 0.3),
    ("top", 0.6),
    ("show", 0.6),
    ("demais", 0.5),
    ("sensacional", 0.9),
];

const PORTUGUESE_NEGATIVE: &[(&str, f64)] = &[
    ("ruim", -0.6),
    ("péssimo", -0.9),
    ("péssima", -0.9),
    ("horrível", -0.9),
    ("terrível", -0.9),
    ("odioso", -0.8),
    ("detesto", -0.8),
    ("odeio", -0.9),
    ("desgosto", -0.6),
    ("desapontado", -0.6),
    ("desapontada", -0.6),
    ("frustrado", -0.6),
    ("frustrada", -0.6),
    ("irritado", -0.6),
    ("irritada", -0.6),
    ("bravo", -0.5),
    ("brava", -0.5),
    ("furioso", -0.8),
    ("furiosa", -0.8),
    ("chateado", -0.5),
    ("chateada", -0.5),
    ("triste", -0.6),
    ("deprimido", -0.7),
    ("deprimida", -0.7),
    ("angustiado", -0.6),
    ("angustiada", -0.6),
    ("preocupado", -0.4),
    ("preocupada", -0.4),
    ("nervoso", -0.4),
    ("nervosa", -0.4),
    ("ansioso", -0.3),
    ("ansiosa", -0.3),
    ("medo", -0.5),
    ("assustado", -0.5),
    ("assustada", -0.5),
    ("decepcionado", -0.7),
    ("decepcionada", -0.7),
    ("decepcionou", -0.7),
    ("chocado", -0.5),
    ("chocada", -0.5),
    ("caro", -0.4),
    ("lixo", -0.9),
    ("porcaria", -0.8),
    ("droga", -0.6),
    ("inferno", -0.7),
    ("desastre", -0.9),
];

const ENGLISH_WORDS: &[(&str, f64)] = &[
    ("good", 0.5),
    ("great", 0.7),
    ("excellent", 0.9),
    ("amazing", 0.9),
    ("awesome", 0.8),
    ("love", 0.8),
    ("like", 0.4),
    ("recommend", 0.7),
    ("happy", 0.7),
    ("perfect", 0.9),
    ("beautiful", 0.7),
    ("delicious", 0.8),
    ("best", 0.7),
    ("bad", -0.6),
    ("terrible", -0.9),
    ("awful", -0.9),
    ("horrible", -0.9),
    ("hate", -0.9),
    ("disappointed", -0.7),
    ("disappointing", -0.7),
    ("angry", -0.7),
    ("sad", -0.6),
    ("worst", -0.9),
    ("expensive", -0.4),
    ("broken", -0.6),
    ("scam", -0.9),
];

const EMOTICONS: &[(&str, f64)] = &[
    (":)", 0.6),
    (":-)", 0.6),
    (":d", 0.7),
    (";)", 0.4),
    ("<3", 0.8),
    (":(", -0.6),
    (":-(", -0.6),
    (":'(", -0.7),
    (":/", -0.3),
];

/// One row of a lexicon CSV file (`token,weight` header required)
#[derive(Debug, Deserialize)]
struct LexiconRow {
    token: String,
    weight: f64,
}

/// Sentiment lexicon
///
/// Tokens are stored NFC-normalized and lowercased. Weights are in [-1, 1].
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Token to sentiment weight mapping
    words: HashMap<String, f64>,
}

impl Lexicon {
    /// Build a lexicon from `(token, weight)` pairs.
    ///
    /// Fails when the result is empty, a token is blank, or a weight is not
    /// a finite number in [-1, 1]. Later duplicates override earlier ones.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut lexicon = Self {
            words: HashMap::new(),
        };
        lexicon.extend(entries)?;

        if lexicon.is_empty() {
            return Err(Error::config("sentiment lexicon is empty"));
        }
        Ok(lexicon)
    }

    /// Built-in lexicon for a language, emoticons included
    pub fn for_language(language: Language) -> Self {
        let words: &[&[(&str, f64)]] = match language {
            Language::Portuguese => &[PORTUGUESE_POSITIVE, PORTUGUESE_NEGATIVE, EMOTICONS],
            Language::English => &[ENGLISH_WORDS, EMOTICONS],
        };

        let words = words
            .iter()
            .flat_map(|list| list.iter())
            .map(|(token, weight)| (canonical(token), *weight))
            .collect();

        Self { words }
    }

    /// Load a lexicon from a CSV file with a `token,weight` header
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            Error::config(format!("cannot open lexicon {}: {}", path.display(), e))
        })?;

        let mut entries = Vec::new();
        for row in reader.deserialize::<LexiconRow>() {
            let row = row.map_err(|e| {
                Error::config(format!("malformed lexicon {}: {}", path.display(), e))
            })?;
            entries.push((row.token, row.weight));
        }

        let lexicon = Self::new(entries)?;
        tracing::debug!(path = %path.display(), count = lexicon.len(), "Loaded lexicon");
        Ok(lexicon)
    }

    /// Add or override entries, validating each one
    pub fn extend<I, S>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        for (token, weight) in entries {
            let token = canonical(token.as_ref());
            if token.is_empty() {
                return Err(Error::config("lexicon contains a blank token"));
            }
            if token.chars().any(char::is_whitespace) {
                return Err(Error::config(format!(
                    "lexicon token '{}' contains whitespace and can never match a single token",
                    token
                )));
            }
            if !weight.is_finite() || !(-1.0..=1.0).contains(&weight) {
                return Err(Error::config(format!(
                    "lexicon weight for '{}' must be within [-1, 1], got {}",
                    token, weight
                )));
            }
            self.words.insert(token, weight);
        }
        Ok(())
    }

    /// Get the weight of a normalized token
    pub fn get_score(&self, token: &str) -> Option<f64> {
        self.words.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains_key(token)
    }

    /// Entries containing non-letter characters, such as `:)` or `<3`.
    ///
    /// The normalizer keeps these whole instead of stripping their
    /// punctuation.
    pub fn emoticons(&self) -> impl Iterator<Item = &str> {
        self.words
            .keys()
            .filter(|token| token.chars().any(|c| !c.is_alphabetic()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn canonical(token: &str) -> String {
    token.trim().nfc().collect::<String>().to_lowercase()
}

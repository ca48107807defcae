//! # Data Module
//!
//! Records, text normalization, stop words and record import/export.

mod preprocessing;
mod record;
mod sample;
pub mod storage;
mod stopwords;

pub use preprocessing::TextNormalizer;
pub use record::{NormalizedRecord, Record, ScoredRecord, SkippedRecord};
pub use sample::sample_records;
pub use stopwords::{Language, StopWords};
pub use storage::LoadedRecords;

//! Record import and result export (CSV / JSON)

use super::record::{Record, ScoredRecord, SkippedRecord};
use crate::error::{Error, Result};
use crate::sentiment::Summary;
use chrono::{DateTime, NaiveDateTime, Utc};
use csv::{Reader, Writer};
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Column layout of the scored export
const SCORED_HEADER: [&str; 9] = [
    "id",
    "created_at",
    "author",
    "text",
    "cleaned_text",
    "tokens",
    "polarity",
    "subjectivity",
    "label",
];

/// One row of a collected-records CSV file
#[derive(Debug, Deserialize)]
struct RecordRow {
    id: String,
    text: String,
    created_at: String,
    #[serde(default, alias = "author_id")]
    author: Option<String>,
}

impl RecordRow {
    fn into_record(self) -> Result<Record> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidRecord(format!(
                "row with text '{}' has no id",
                self.text
            )));
        }

        let timestamp = parse_timestamp(&self.created_at).ok_or_else(|| {
            Error::InvalidRecord(format!(
                "record {}: cannot parse timestamp '{}'",
                self.id, self.created_at
            ))
        })?;

        let mut record = Record::new(self.id, self.text).with_timestamp(timestamp);
        if let Some(author) = self.author.filter(|a| !a.trim().is_empty()) {
            record = record.with_author(author);
        }
        Ok(record)
    }
}

/// Parse RFC 3339 or `YYYY-MM-DD HH:MM:SS` (taken as UTC)
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Records read from a collector file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedRecords {
    /// Rows that became records, in file order
    pub records: Vec<Record>,
    /// Rows that could not become records
    pub rejected: Vec<SkippedRecord>,
}

impl From<Vec<Record>> for LoadedRecords {
    fn from(records: Vec<Record>) -> Self {
        Self {
            records,
            rejected: Vec::new(),
        }
    }
}

/// Read records from CSV with columns `id,text,created_at[,author]`.
///
/// A row that cannot become a record is rejected with a warning and the
/// rest of the file is still read. I/O failures abort the read.
pub fn read_records<R: Read>(reader: R) -> Result<LoadedRecords> {
    let mut reader = Reader::from_reader(reader);
    let mut loaded = LoadedRecords::default();

    for (index, row) in reader.deserialize::<RecordRow>().enumerate() {
        let fallback_id = || format!("row {}", index + 1);
        let result = match row {
            Ok(row) => {
                let id = if row.id.trim().is_empty() {
                    fallback_id()
                } else {
                    row.id.clone()
                };
                row.into_record().map_err(|err| (id, err))
            }
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => Err((fallback_id(), Error::from(err))),
        };

        match result {
            Ok(record) => loaded.records.push(record),
            Err((id, err)) => {
                tracing::warn!(id = %id, error = %err, "Rejecting collector row");
                loaded.rejected.push(SkippedRecord {
                    id,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(loaded)
}

/// Load records from a CSV file
pub fn load_records(path: &Path) -> Result<LoadedRecords> {
    let file = File::open(path)?;
    let loaded = read_records(file)?;
    tracing::info!(
        path = %path.display(),
        count = loaded.records.len(),
        rejected = loaded.rejected.len(),
        "Loaded records"
    );
    Ok(loaded)
}

/// Write scored records as CSV, one row per record
pub fn write_scored_records<W: Write>(writer: W, records: &[ScoredRecord]) -> Result<()> {
    let mut writer = Writer::from_writer(writer);

    writer.write_record(SCORED_HEADER)?;

    for scored in records {
        let record = scored.record();
        writer.write_record([
            record.id.clone(),
            record.timestamp.to_rfc3339(),
            record.author.clone().unwrap_or_default(),
            record.text.clone(),
            scored.normalized().cleaned_text().to_string(),
            scored.tokens().join(" "),
            scored.polarity().to_string(),
            scored.subjectivity().to_string(),
            scored.label().as_str().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Save scored records to a CSV file
pub fn save_scored_records(path: &Path, records: &[ScoredRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_scored_records(file, records)?;
    tracing::info!(path = %path.display(), count = records.len(), "Saved scored records");
    Ok(())
}

/// Save a summary as pretty-printed JSON
pub fn save_summary(path: &Path, summary: &Summary) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    tracing::info!(path = %path.display(), "Saved summary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TextNormalizer;
    use crate::data::Language;
    use crate::sentiment::{LexiconScorer, PolarityScorer, Thresholds};
    use chrono::TimeZone;
    use std::sync::Arc;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-15 10:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T10:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T07:30:00-03:00"), Some(expected));
        assert_eq!(parse_timestamp("15/01/2024"), None);
    }

    #[test]
    fn test_read_records() {
        let data = "id,text,created_at,author_id\n\
                    1,Adorei o produto,2024-01-15 10:30:00,user1\n\
                    2,\"Caro, muito caro\",2024-01-15T11:45:00Z,\n";
        let records = read_records(data.as_bytes()).unwrap().records;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].author.as_deref(), Some("user1"));
        assert_eq!(records[1].text, "Caro, muito caro");
        assert_eq!(records[1].author, None);
    }

    #[test]
    fn test_read_records_without_author_column() {
        let data = "id,text,created_at\n1,Bom,2024-01-15 10:30:00\n";
        let records = read_records(data.as_bytes()).unwrap().records;
        assert_eq!(records[0].author, None);
    }

    #[test]
    fn test_bad_rows_are_rejected_not_fatal() {
        let data = "id,text,created_at\n\
                    1,Bom,2024-01-15 10:30:00\n\
                    2,Ruim,yesterday\n\
                    ,Sem id,2024-01-15 11:00:00\n\
                    3,Ótimo,2024-01-15 12:00:00\n";
        let loaded = read_records(data.as_bytes()).unwrap();

        let ids: Vec<&str> = loaded.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);

        assert_eq!(loaded.rejected.len(), 2);
        assert_eq!(loaded.rejected[0].id, "2");
        assert!(loaded.rejected[0].reason.contains("yesterday"));
        assert_eq!(loaded.rejected[1].id, "row 3");
    }

    #[test]
    fn test_malformed_row_is_rejected() {
        let data = "id,text,created_at\n1,Bom,2024-01-15 10:30:00\n2\n";
        let loaded = read_records(data.as_bytes()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.rejected[0].id, "row 2");
    }

    #[test]
    fn test_write_scored_records() {
        let normalizer = TextNormalizer::for_language(Language::Portuguese);
        let scorer = LexiconScorer::new(Arc::new(crate::sentiment::Lexicon::for_language(
            Language::Portuguese,
        )));
        let record = Record::new("1", "Amo este produto, é incrível!").with_author("ana");
        let normalized = normalizer.normalize(&record).unwrap();
        let score = scorer.score(normalized.tokens());
        let scored = ScoredRecord::new(normalized, score, &Thresholds::default());

        let mut buffer = Vec::new();
        write_scored_records(&mut buffer, &[scored]).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("id,created_at,author,text,cleaned_text,tokens,polarity,subjectivity,label")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("1,"));
        assert!(row.contains("amo produto incrível"));
        assert!(row.ends_with(",positive"));
    }
}

//! # Sentiment Aggregator
//!
//! Reduces scored records into a [`Summary`]: label counts and percentages,
//! descriptive statistics, top tokens per label, extremes and a daily
//! timeline.
//!
//! Everything except the top-token tie-break is independent of record
//! order. Sums run over sorted values so permuted inputs give bit-identical
//! results.

use super::analyzer::SentimentLabel;
use crate::data::ScoredRecord;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// 100% expressed in basis points (hundredths of a percent)
const FULL_BASIS_POINTS: u32 = 10_000;

/// Count and share of one label
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LabelShare {
    /// Number of records with this label
    pub count: usize,
    /// Share of all records, in percent with two decimals
    pub percentage: f64,
    /// Same share in basis points; the three labels always add up to 10000
    /// for a non-empty summary
    pub basis_points: u32,
}

/// Descriptive statistics of one score (population std)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

/// Token frequency within one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

/// The most positive or most negative record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extreme {
    pub id: String,
    pub text: String,
    pub polarity: f64,
}

/// Label counts for one calendar day (UTC)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySentiment {
    pub date: NaiveDate,
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub mean_polarity: f64,
}

/// Aggregate view over a set of scored records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of records summarized
    pub total: usize,
    /// Count and percentage per label
    pub labels: BTreeMap<SentimentLabel, LabelShare>,
    /// Label with the most records, `None` when empty
    pub dominant: Option<SentimentLabel>,
    /// Polarity statistics, undefined when empty
    #[serde(serialize_with = "undefined_if_none")]
    pub polarity: Option<DescriptiveStats>,
    /// Subjectivity statistics, undefined when empty
    #[serde(serialize_with = "undefined_if_none")]
    pub subjectivity: Option<DescriptiveStats>,
    /// Most frequent tokens per label
    pub top_tokens: BTreeMap<SentimentLabel, Vec<TokenCount>>,
    pub most_positive: Option<Extreme>,
    pub most_negative: Option<Extreme>,
    /// One entry per day, oldest first
    pub timeline: Vec<DailySentiment>,
}

impl Summary {
    /// Count for a label
    pub fn count(&self, label: SentimentLabel) -> usize {
        self.labels.get(&label).map(|share| share.count).unwrap_or(0)
    }

    /// Percentage for a label
    pub fn percentage(&self, label: SentimentLabel) -> f64 {
        self.labels
            .get(&label)
            .map(|share| share.percentage)
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

fn undefined_if_none<S>(stats: &Option<DescriptiveStats>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match stats {
        Some(stats) => stats.serialize(serializer),
        None => serializer.serialize_str("undefined"),
    }
}

/// Sentiment aggregator
#[derive(Debug, Clone)]
pub struct SentimentAggregator {
    /// Number of tokens kept per label
    top_n: usize,
}

impl Default for SentimentAggregator {
    fn default() -> Self {
        Self::new(crate::defaults::TOP_N)
    }
}

impl SentimentAggregator {
    /// Create an aggregator keeping `top_n` tokens per label
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Summarize scored records
    pub fn summarize(&self, records: &[ScoredRecord]) -> Summary {
        let counts = SentimentLabel::ALL
            .map(|label| records.iter().filter(|r| r.label() == label).count());
        let basis_points = largest_remainder(&counts, records.len());

        let labels: BTreeMap<SentimentLabel, LabelShare> = SentimentLabel::ALL
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let share = LabelShare {
                    count: counts[i],
                    percentage: f64::from(basis_points[i]) / 100.0,
                    basis_points: basis_points[i],
                };
                (*label, share)
            })
            .collect();

        let dominant = dominant_label(&counts);

        let polarity = describe(records.iter().map(|r| r.polarity()).collect());
        let subjectivity = describe(records.iter().map(|r| r.subjectivity()).collect());

        let top_tokens = SentimentLabel::ALL
            .iter()
            .map(|label| (*label, self.top_tokens(records, *label)))
            .collect();

        let most_positive = extreme(records, |a, b| a > b);
        let most_negative = extreme(records, |a, b| a < b);

        let summary = Summary {
            total: records.len(),
            labels,
            dominant,
            polarity,
            subjectivity,
            top_tokens,
            most_positive,
            most_negative,
            timeline: timeline(records),
        };

        tracing::debug!(
            total = summary.total,
            positive = counts[0],
            negative = counts[1],
            neutral = counts[2],
            "Summarized records"
        );

        summary
    }

    /// Most frequent tokens among records with `label`.
    ///
    /// Descending frequency; ties go to the token seen first in record order.
    fn top_tokens(&self, records: &[ScoredRecord], label: SentimentLabel) -> Vec<TokenCount> {
        let mut frequencies: HashMap<&str, (usize, usize)> = HashMap::new();
        let mut position = 0usize;

        for record in records.iter().filter(|r| r.label() == label) {
            for token in record.tokens() {
                let entry = frequencies.entry(token.as_str()).or_insert((0, position));
                entry.0 += 1;
                position += 1;
            }
        }

        let mut ranked: Vec<(&str, usize, usize)> = frequencies
            .into_iter()
            .map(|(token, (count, first_seen))| (token, count, first_seen))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked
            .into_iter()
            .take(self.top_n)
            .map(|(token, count, _)| TokenCount {
                token: token.to_string(),
                count,
            })
            .collect()
    }
}

/// Split 10000 basis points across `counts` so the parts add up exactly.
///
/// Each part gets its floor share; the leftover points go to the largest
/// remainders, ties to the earlier label.
fn largest_remainder(counts: &[usize; 3], total: usize) -> [u32; 3] {
    if total == 0 {
        return [0; 3];
    }

    let total = total as u64;
    let mut points = [0u32; 3];
    let mut remainders = [0u64; 3];
    for (i, count) in counts.iter().enumerate() {
        let scaled = *count as u64 * u64::from(FULL_BASIS_POINTS);
        points[i] = (scaled / total) as u32;
        remainders[i] = scaled % total;
    }

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]).then(a.cmp(&b)));

    let mut leftover = FULL_BASIS_POINTS - points.iter().sum::<u32>();
    for i in order {
        if leftover == 0 {
            break;
        }
        points[i] += 1;
        leftover -= 1;
    }

    points
}

fn dominant_label(counts: &[usize; 3]) -> Option<SentimentLabel> {
    let (index, count) = counts
        .iter()
        .enumerate()
        .fold((0, 0), |best, (i, &c)| if c > best.1 { (i, c) } else { best });
    (count > 0).then_some(SentimentLabel::ALL[index])
}

fn describe(mut values: Vec<f64>) -> Option<DescriptiveStats> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    let mid = values.len() / 2;
    let median = if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    };

    Some(DescriptiveStats {
        mean,
        std: variance.sqrt(),
        min: values[0],
        max: values[values.len() - 1],
        median,
    })
}

/// Pick the record whose polarity beats all others under `better`; equal
/// polarities go to the smallest id.
fn extreme(records: &[ScoredRecord], better: impl Fn(f64, f64) -> bool) -> Option<Extreme> {
    records
        .iter()
        .reduce(|best, candidate| {
            let (p, q) = (candidate.polarity(), best.polarity());
            if better(p, q) || (p == q && candidate.id() < best.id()) {
                candidate
            } else {
                best
            }
        })
        .map(|record| Extreme {
            id: record.id().to_string(),
            text: record.record().text.clone(),
            polarity: record.polarity(),
        })
}

fn timeline(records: &[ScoredRecord]) -> Vec<DailySentiment> {
    let mut days: BTreeMap<NaiveDate, Vec<&ScoredRecord>> = BTreeMap::new();
    for record in records {
        days.entry(record.record().timestamp.date_naive())
            .or_default()
            .push(record);
    }

    days.into_iter()
        .map(|(date, day_records)| {
            let count = |label: SentimentLabel| {
                day_records.iter().filter(|r| r.label() == label).count()
            };
            let mut polarities: Vec<f64> = day_records.iter().map(|r| r.polarity()).collect();
            polarities.sort_by(f64::total_cmp);

            DailySentiment {
                date,
                total: day_records.len(),
                positive: count(SentimentLabel::Positive),
                negative: count(SentimentLabel::Negative),
                neutral: count(SentimentLabel::Neutral),
                mean_polarity: polarities.iter().sum::<f64>() / polarities.len() as f64,
            }
        })
        .collect()
}

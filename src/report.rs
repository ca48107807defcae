//! # Report
//!
//! Plain-text report with insights and recommendations derived from a
//! [`Summary`].

use crate::error::Result;
use crate::sentiment::{DescriptiveStats, SentimentLabel, Summary};
use chrono::{DateTime, Utc};
use std::fmt::{self, Write};
use std::path::Path;

/// Share above which a label is said to dominate
const DOMINANCE_PCT: f64 = 50.0;
/// Negative share that already calls for crisis handling
const CRISIS_PCT: f64 = 40.0;
/// Mean polarity band read as neutral perception
const NEUTRAL_POLARITY: f64 = 0.1;
const HIGH_SUBJECTIVITY: f64 = 0.6;
const LOW_SUBJECTIVITY: f64 = 0.4;

/// Renders brand reports
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    brand: String,
}

impl ReportGenerator {
    pub fn new(brand: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
        }
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Observations about the distribution, polarity and subjectivity
    pub fn insights(&self, summary: &Summary) -> Vec<String> {
        if summary.is_empty() {
            return vec!["No posts were available to analyze.".to_string()];
        }

        let mut insights = Vec::new();

        match summary.dominant {
            Some(label) if summary.percentage(label) > DOMINANCE_PCT => insights.push(format!(
                "{} sentiment dominates with {:.1}% of the posts.",
                capitalize(label.as_str()),
                summary.percentage(label)
            )),
            Some(label) => insights.push(format!(
                "Perception is divided: {} sentiment leads with {:.1}% of the posts.",
                label.as_str(),
                summary.percentage(label)
            )),
            None => insights
                .push("Perception is divided, no sentiment clearly dominates.".to_string()),
        }

        if let Some(polarity) = &summary.polarity {
            let mean = polarity.mean;
            insights.push(if mean > NEUTRAL_POLARITY {
                format!("Positive mean polarity ({:.2}) points to a favorable perception.", mean)
            } else if mean < -NEUTRAL_POLARITY {
                format!("Negative mean polarity ({:.2}) points to an unfavorable perception.", mean)
            } else {
                format!("Neutral mean polarity ({:.2}) points to a balanced perception.", mean)
            });
        }

        if let Some(subjectivity) = &summary.subjectivity {
            let mean = subjectivity.mean;
            insights.push(if mean > HIGH_SUBJECTIVITY {
                format!("High subjectivity ({:.2}): posts are emotional and personal.", mean)
            } else if mean < LOW_SUBJECTIVITY {
                format!("Low subjectivity ({:.2}): posts are mostly factual.", mean)
            } else {
                format!("Moderate subjectivity ({:.2}): a mix of emotional and factual posts.", mean)
            });
        }

        if summary.most_positive.as_ref().is_some_and(|e| e.polarity > 0.0) {
            insights.push("Strongly positive posts highlight the brand's strengths.".to_string());
        }
        if summary.most_negative.as_ref().is_some_and(|e| e.polarity < 0.0) {
            insights.push("Strongly negative posts point to areas to improve.".to_string());
        }

        insights
    }

    /// Suggested actions, most specific first
    pub fn recommendations(&self, summary: &Summary) -> Vec<String> {
        let mut recommendations: Vec<String> = match summary.dominant {
            Some(SentimentLabel::Negative)
                if summary.percentage(SentimentLabel::Negative) > CRISIS_PCT =>
            {
                vec![
                    "Put crisis communication in place to recover perception.".into(),
                    "Investigate the main causes of the negative posts.".into(),
                    "Run engagement campaigns with satisfied customers.".into(),
                ]
            }
            Some(SentimentLabel::Positive)
                if summary.percentage(SentimentLabel::Positive) > DOMINANCE_PCT =>
            {
                vec![
                    "Build marketing campaigns on the positive sentiment.".into(),
                    "Amplify positive posts on social media.".into(),
                    "Feed positive feedback back into products and services.".into(),
                ]
            }
            _ => vec![
                "Keep monitoring brand perception.".into(),
                "Work on turning neutral sentiment into positive.".into(),
            ],
        };

        recommendations.extend(
            [
                "Set up continuous real-time sentiment monitoring.",
                "Train customer service to respond to posts appropriately.",
                "Define fast-response protocols for brand crises.",
            ]
            .map(String::from),
        );

        recommendations
    }

    /// Write the full report
    pub fn write_text<W: Write>(
        &self,
        out: &mut W,
        summary: &Summary,
        generated_at: DateTime<Utc>,
    ) -> fmt::Result {
        let title = format!("SENTIMENT REPORT - {}", self.brand.to_uppercase());
        writeln!(out, "{}", title)?;
        writeln!(out, "{}", "=".repeat(title.chars().count()))?;
        writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(out, "Posts analyzed: {}", summary.total)?;

        writeln!(out, "\nDistribution")?;
        for label in SentimentLabel::ALL {
            writeln!(
                out,
                "  {:<10} {:>6}  ({:>6.2}%)",
                label.as_str(),
                summary.count(label),
                summary.percentage(label)
            )?;
        }

        writeln!(out, "\nStatistics")?;
        write_stats(out, "polarity", summary.polarity.as_ref())?;
        write_stats(out, "subjectivity", summary.subjectivity.as_ref())?;

        writeln!(out, "\nTop tokens")?;
        for (label, tokens) in &summary.top_tokens {
            let listed: Vec<String> = tokens
                .iter()
                .map(|t| format!("{} ({})", t.token, t.count))
                .collect();
            let listed = if listed.is_empty() {
                "-".to_string()
            } else {
                listed.join(", ")
            };
            writeln!(out, "  {:<10} {}", label.as_str(), listed)?;
        }

        if let Some(extreme) = &summary.most_positive {
            writeln!(
                out,
                "\nMost positive [{}] ({:.3}): {}",
                extreme.id, extreme.polarity, extreme.text
            )?;
        }
        if let Some(extreme) = &summary.most_negative {
            writeln!(
                out,
                "Most negative [{}] ({:.3}): {}",
                extreme.id, extreme.polarity, extreme.text
            )?;
        }

        if !summary.timeline.is_empty() {
            writeln!(out, "\nTimeline")?;
            for day in &summary.timeline {
                writeln!(
                    out,
                    "  {}  total {:>4}  +{:<4} -{:<4} ={:<4} mean {:.3}",
                    day.date, day.total, day.positive, day.negative, day.neutral, day.mean_polarity
                )?;
            }
        }

        writeln!(out, "\nInsights")?;
        for insight in self.insights(summary) {
            writeln!(out, "  - {}", insight)?;
        }

        writeln!(out, "\nRecommendations")?;
        for recommendation in self.recommendations(summary) {
            writeln!(out, "  - {}", recommendation)?;
        }

        Ok(())
    }

    /// Render the full report into a string
    pub fn render_text(&self, summary: &Summary, generated_at: DateTime<Utc>) -> String {
        let mut out = String::new();
        // fmt::Write for String never fails
        let _ = self.write_text(&mut out, summary, generated_at);
        out
    }

    /// Render and save the report
    pub fn save_text(&self, path: &Path, summary: &Summary, generated_at: DateTime<Utc>) -> Result<()> {
        std::fs::write(path, self.render_text(summary, generated_at))?;
        tracing::info!(path = %path.display(), "Saved report");
        Ok(())
    }
}

fn write_stats<W: Write>(out: &mut W, name: &str, stats: Option<&DescriptiveStats>) -> fmt::Result {
    match stats {
        Some(s) => writeln!(
            out,
            "  {:<12} mean {:.3}  std {:.3}  min {:.3}  median {:.3}  max {:.3}",
            name, s.mean, s.std, s.min, s.median, s.max
        ),
        None => writeln!(out, "  {:<12} mean undefined  std undefined", name),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

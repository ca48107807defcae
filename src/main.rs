//! CLI tool for brand sentiment analysis
//!
//! Provides commands for analyzing a batch of posts, scoring a single text,
//! and writing a default configuration file.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use brand_sentiment::data::storage;
use brand_sentiment::utils::init_logging;
use brand_sentiment::{
    load_config, sample_records, save_config, AppConfig, LoadedRecords, Pipeline, Record,
    ReportGenerator, SentimentLabel,
};

#[derive(Parser)]
#[command(name = "brand-sentiment")]
#[command(about = "Social media sentiment analysis for a brand", long_about = None)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a batch of posts and write CSV, JSON and report files
    Analyze {
        /// Brand name used in the report and file names
        #[arg(short, long)]
        brand: Option<String>,

        /// CSV file with columns id,text,created_at[,author]; the built-in
        /// sample set is used when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Tokens listed per label
        #[arg(long)]
        top_n: Option<usize>,
    },

    /// Score a single text
    Score {
        /// Text to analyze
        #[arg(short, long)]
        text: String,
    },

    /// Write a configuration file with default values
    InitConfig {
        /// Destination (.toml or .json)
        #[arg(short, long, default_value = "sentiment.toml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };

    init_logging(&config.logging);

    match cli.command {
        Commands::Analyze {
            brand,
            input,
            output_dir,
            top_n,
        } => {
            let mut config = config;
            if let Some(brand) = brand {
                config.output.brand = brand;
            }
            if let Some(dir) = output_dir {
                config.output.dir = dir;
            }
            if let Some(top_n) = top_n {
                config.summary.top_n = top_n;
            }
            analyze(&config, input.as_deref())?;
        }
        Commands::Score { text } => {
            score(&config, &text)?;
        }
        Commands::InitConfig { path } => {
            save_config(&AppConfig::default(), &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

fn analyze(config: &AppConfig, input: Option<&Path>) -> Result<()> {
    let pipeline = Pipeline::from_config(config).context("Invalid configuration")?;

    let loaded = match input {
        Some(path) => storage::load_records(path)
            .with_context(|| format!("Failed to load records from {}", path.display()))?,
        None => {
            tracing::info!("No input given, using the built-in sample set");
            LoadedRecords::from(sample_records())
        }
    };

    let output = pipeline.run_loaded(&loaded);
    let summary = &output.summary;

    let brand = &config.output.brand;
    let slug = file_slug(brand);
    let dir = &config.output.dir;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let csv_path = dir.join(format!("analyzed_{}.csv", slug));
    let json_path = dir.join(format!("summary_{}.json", slug));
    let report_path = dir.join(format!("report_{}.txt", slug));

    storage::save_scored_records(&csv_path, &output.scored)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;
    storage::save_summary(&json_path, summary)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;
    ReportGenerator::new(brand.as_str())
        .save_text(&report_path, summary, Utc::now())
        .with_context(|| format!("Failed to write {}", report_path.display()))?;

    println!("Sentiment analysis for {}\n", brand);
    println!("{:<10} {:>8} {:>10}", "Label", "Count", "Share");
    println!("{}", "-".repeat(30));
    for label in SentimentLabel::ALL {
        println!(
            "{:<10} {:>8} {:>9.2}%",
            label.as_str(),
            summary.count(label),
            summary.percentage(label)
        );
    }

    match &summary.polarity {
        Some(stats) => println!("\nMean polarity: {:.3} (std {:.3})", stats.mean, stats.std),
        None => println!("\nMean polarity: undefined"),
    }

    if !output.skipped.is_empty() {
        println!("\nSkipped {} record(s):", output.skipped.len());
        for skipped in &output.skipped {
            println!("  {}: {}", skipped.id, skipped.reason);
        }
    }

    println!("\nFiles written:");
    for path in [&csv_path, &json_path, &report_path] {
        println!("  {}", path.display());
    }

    Ok(())
}

fn score(config: &AppConfig, text: &str) -> Result<()> {
    let pipeline = Pipeline::from_config(config).context("Invalid configuration")?;
    let scored = pipeline
        .analyzer()
        .analyze(&Record::new("cli", text))
        .context("Text has no tokens left after cleaning")?;

    println!("Tokens:       {}", scored.tokens().join(" "));
    println!("Polarity:     {:.3}", scored.polarity());
    println!("Subjectivity: {:.3}", scored.subjectivity());
    println!("Label:        {}", scored.label());

    Ok(())
}

/// Lowercase brand name with anything but letters and digits replaced by `_`
fn file_slug(brand: &str) -> String {
    let slug: String = brand
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if slug.is_empty() {
        "brand".to_string()
    } else {
        slug
    }
}

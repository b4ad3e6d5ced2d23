use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::AppConfig;
use crate::data::model::{DataIssue, PreparedDataset};
use crate::data::prepare::prepare;
use crate::data::projection::{conference_groups, rank_by_uniformity, ConferenceGroup};

/// Headless summary of a prepared dataset.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub source: String,
    pub songs: usize,
    pub conferences: usize,
    pub big_ten_songs: usize,
    pub year_median: Option<f64>,
    /// Conference → aggression CV, most uniform first.
    pub aggression_cv: Vec<(&'a str, f64)>,
    pub issues: &'a [DataIssue],
}

impl<'a> CheckReport<'a> {
    pub fn new(dataset: &'a PreparedDataset, groups: &'a [ConferenceGroup]) -> Self {
        CheckReport {
            source: dataset.source.display().to_string(),
            songs: dataset.len(),
            conferences: groups.len(),
            big_ten_songs: dataset.songs.iter().filter(|s| s.is_big_ten).count(),
            year_median: dataset.year_median,
            aggression_cv: rank_by_uniformity(groups),
            issues: &dataset.issues,
        }
    }
}

/// `--check`: prepare the dataset and report on it without a window.
pub fn run(config: &AppConfig) -> Result<()> {
    let dataset = prepare(&config.data)
        .with_context(|| format!("preparing {}", config.data.display()))?;
    let groups = conference_groups(&dataset);
    let report = CheckReport::new(&dataset, &groups);

    if config.json {
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "{}: {} songs, {} conferences, {} Big Ten",
        report.source, report.songs, report.conferences, report.big_ten_songs
    );
    if let Some(median) = report.year_median {
        println!("Median year: {median}");
    }
    for (conference, cv) in &report.aggression_cv {
        println!("  {conference:<20} aggression CV {cv:.2}");
    }
    if report.issues.is_empty() {
        println!("No data issues found.");
    } else {
        println!("Found {} data issues:", report.issues.len());
        for issue in report.issues {
            println!("- {issue}");
        }
    }
    Ok(())
}

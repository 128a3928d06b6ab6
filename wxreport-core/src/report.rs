use crate::{
    Config,
    fetch::{Fetch, HttpFetch},
};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

pub mod current;
pub mod forecast;
pub mod geocode;
pub mod history;

/// Returned when geocoding yields no match; nothing else runs in that case.
pub const CITY_NOT_FOUND: &str = "City not found.";

/// Orchestrates geocoding and the three report sections, then appends the
/// composed text to the persistent report file.
#[derive(Debug)]
pub struct ReportComposer {
    fetcher: Box<dyn Fetch>,
    api_key: String,
    report_file: PathBuf,
}

impl ReportComposer {
    pub fn new(
        fetcher: Box<dyn Fetch>,
        api_key: impl Into<String>,
        report_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            api_key: api_key.into(),
            report_file: report_file.into(),
        }
    }

    /// Build a composer wired to the live HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?.to_owned();
        let fetcher = Box::new(HttpFetch::new(config.endpoints.clone()));
        let report_file = config.report_file_path()?;

        Ok(Self::new(fetcher, api_key, report_file))
    }

    /// Compose a full report for `city` relative to the local calendar date.
    pub async fn compose(&self, city: &str) -> Result<String> {
        self.compose_for_date(city, Local::now().date_naive()).await
    }

    /// `today` is injected so the date-window logic stays testable.
    pub async fn compose_for_date(&self, city: &str, today: NaiveDate) -> Result<String> {
        let fetch = self.fetcher.as_ref();

        let Some(coord) = geocode::resolve_city(fetch, &self.api_key, city).await else {
            return Ok(CITY_NOT_FOUND.to_string());
        };

        let current = current::current_conditions(fetch, &self.api_key, city).await;
        let past = history::past_three_days(fetch, coord, today).await;
        let next = forecast::next_three_days(fetch, &self.api_key, city, today).await;

        let mut report = format!("\nWeather Report for {}\n{}\n", title_case(city), "-".repeat(40));
        report.push_str(&format!("\n--- Current Weather ---\n{current}\n"));
        report.push_str(&format!("\n--- Past 3 Days ---\n{}\n", past.join("\n")));
        report.push_str(&format!("\n--- Next 3 Days Forecast ---\n{}\n", next.join("\n")));

        self.append_report(&report)?;
        tracing::info!("Weather report generated for {city}");

        Ok(report)
    }

    /// Append one report block plus a trailing blank line.
    fn append_report(&self, report: &str) -> Result<()> {
        if let Some(parent) = self.report_file.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create report directory: {}", parent.display())
            })?;
        }

        let mut file = fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.report_file)
            .with_context(|| {
                format!("Failed to open report file: {}", self.report_file.display())
            })?;

        writeln!(file, "{report}").with_context(|| {
            format!("Failed to append to report file: {}", self.report_file.display())
        })?;

        Ok(())
    }

    pub fn report_file(&self) -> &Path {
        &self.report_file
    }
}

/// Uppercase the first letter, lowercase the rest ("light RAIN" → "Light rain").
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// Title-case each whitespace-separated word ("new york" → "New York").
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<String>>()
        .join(" ")
}

/// Round to one decimal place, matching the report's display precision.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

use crate::{
    fetch::{Endpoint, Fetch},
    model::{DaySummary, ForecastEntry},
    report::{capitalize, round1},
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::HashMap;

/// Fixed placeholder returned as the only line when the forecast call fails.
pub const FORECAST_UNAVAILABLE: &str = "No forecast data.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    dt_txt: String,
    main: RawMain,
    weather: Vec<RawDescription>,
    wind: RawWind,
}

#[derive(Debug, Deserialize)]
struct RawMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct RawDescription {
    description: String,
}

#[derive(Debug, Deserialize)]
struct RawWind {
    speed: f64,
}

impl RawEntry {
    fn into_entry(self) -> Option<ForecastEntry> {
        let timestamp = NaiveDateTime::parse_from_str(&self.dt_txt, TIMESTAMP_FORMAT).ok()?;
        let description = self.weather.into_iter().next()?.description;

        Some(ForecastEntry {
            timestamp,
            description,
            temperature_c: self.main.temp,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
        })
    }
}

/// Fetch the 3-hourly forecast for a city and reduce it to one line per day
/// for today+1 through today+3. Days the provider horizon never covered are
/// skipped, so the result can be shorter than three lines.
pub async fn next_three_days(
    fetch: &dyn Fetch,
    api_key: &str,
    city: &str,
    today: NaiveDate,
) -> Vec<String> {
    let params = [
        ("q", city.to_string()),
        ("appid", api_key.to_string()),
        ("units", "metric".to_string()),
    ];

    let Ok(value) = fetch.fetch(Endpoint::Forecast, &params).await else {
        return vec![FORECAST_UNAVAILABLE.to_string()];
    };
    let Ok(parsed) = serde_json::from_value::<ForecastResponse>(value) else {
        return vec![FORECAST_UNAVAILABLE.to_string()];
    };

    let entries: Vec<ForecastEntry> = parsed
        .list
        .into_iter()
        .filter_map(RawEntry::into_entry)
        .collect();

    summarize_days(&entries, today)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Group entries by calendar date (the date portion of each timestamp, taken
/// as the provider gave it) and reduce the groups for today+1..=today+3 in
/// ascending order. Dates with no contributing entries produce no summary.
pub fn summarize_days(entries: &[ForecastEntry], today: NaiveDate) -> Vec<DaySummary> {
    let mut groups: HashMap<NaiveDate, Vec<&ForecastEntry>> = HashMap::new();
    for entry in entries {
        groups.entry(entry.timestamp.date()).or_default().push(entry);
    }

    let mut summaries = Vec::with_capacity(3);
    for offset in 1..=3 {
        let date = today + Duration::days(offset);
        if let Some(group) = groups.get(&date) {
            summaries.push(reduce_day(date, group));
        }
    }
    summaries
}

fn reduce_day(date: NaiveDate, group: &[&ForecastEntry]) -> DaySummary {
    let n = group.len() as f64;
    let (mut temp, mut humidity, mut wind) = (0.0, 0.0, 0.0);
    for entry in group {
        temp += entry.temperature_c;
        humidity += entry.humidity_pct;
        wind += entry.wind_speed_mps;
    }

    DaySummary {
        date,
        dominant_description: dominant_description(group),
        mean_temperature_c: round1(temp / n),
        mean_humidity_pct: round1(humidity / n),
        mean_wind_speed_mps: round1(wind / n),
    }
}

/// Stable mode over the capitalized descriptions: the first-encountered
/// description wins ties.
fn dominant_description(group: &[&ForecastEntry]) -> String {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for entry in group {
        let description = capitalize(&entry.description);
        match counts.iter_mut().find(|(d, _)| *d == description) {
            Some((_, count)) => *count += 1,
            None => counts.push((description, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (description, count) in counts {
        match &best {
            Some((_, best_count)) if count <= *best_count => {}
            _ => best = Some((description, count)),
        }
    }

    best.map(|(description, _)| description)
        .unwrap_or_else(|| "Unknown".to_string())
}

use crate::{
    fetch::{Endpoint, Fetch},
    model::Coordinate,
};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;

/// Fixed placeholder returned as the only line when the archive call fails.
pub const HISTORY_UNAVAILABLE: &str = "No past weather data.";

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,windspeed_10m_max";

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: ArchiveDaily,
}

#[derive(Debug, Deserialize)]
struct ArchiveDaily {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    windspeed_10m_max: Vec<f64>,
}

/// Summarize the three complete days before yesterday's end: the window is
/// [today-3, today-1] inclusive. One line per day in provider (ascending)
/// order; the provider may legitimately return fewer than three days.
pub async fn past_three_days(fetch: &dyn Fetch, coord: Coordinate, today: NaiveDate) -> Vec<String> {
    let start = today - Duration::days(3);
    let end = today - Duration::days(1);

    let params = [
        ("latitude", coord.latitude.to_string()),
        ("longitude", coord.longitude.to_string()),
        ("start_date", start.to_string()),
        ("end_date", end.to_string()),
        ("daily", DAILY_FIELDS.to_string()),
        ("timezone", "auto".to_string()),
    ];

    let Ok(value) = fetch.fetch(Endpoint::Historical, &params).await else {
        return vec![HISTORY_UNAVAILABLE.to_string()];
    };
    let Ok(parsed) = serde_json::from_value::<ArchiveResponse>(value) else {
        return vec![HISTORY_UNAVAILABLE.to_string()];
    };

    let daily = parsed.daily;
    let days = daily
        .time
        .len()
        .min(daily.temperature_2m_max.len())
        .min(daily.temperature_2m_min.len())
        .min(daily.windspeed_10m_max.len());

    (0..days)
        .map(|i| {
            let avg = (daily.temperature_2m_max[i] + daily.temperature_2m_min[i]) / 2.0;
            format!(
                "{}: Avg Temp: {avg:.1}°C, Max Wind: {} m/s",
                daily.time[i], daily.windspeed_10m_max[i],
            )
        })
        .collect()
}

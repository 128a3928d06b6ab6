use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Latitude/longitude pair produced by the geocoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// One sub-daily provider observation, as returned by the forecast feed.
#[derive(Debug, Clone)]
pub struct ForecastEntry {
    pub timestamp: NaiveDateTime,
    pub description: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_mps: f64,
}

/// One aggregated day, reduced from all entries sharing a calendar date.
/// Means are stored already rounded to one decimal.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub dominant_description: String,
    pub mean_temperature_c: f64,
    pub mean_humidity_pct: f64,
    pub mean_wind_speed_mps: f64,
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}, {:.1}°C, {:.1}% humidity, {:.1} m/s wind",
            self.date,
            self.dominant_description,
            self.mean_temperature_c,
            self.mean_humidity_pct,
            self.mean_wind_speed_mps,
        )
    }
}

use crate::{
    fetch::{Endpoint, Fetch},
    report::capitalize,
};
use serde::Deserialize;

/// Fixed sentence shown when the current-conditions call fails in any way.
pub const CURRENT_UNAVAILABLE: &str = "Unable to fetch current weather.";

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    weather: Vec<CurrentDescription>,
    main: CurrentMain,
    wind: CurrentWind,
}

#[derive(Debug, Deserialize)]
struct CurrentDescription {
    description: String,
}

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentWind {
    speed: f64,
}

/// Fetch and format today's conditions for a city: exactly four lines on
/// success, the fixed unavailable sentence on any failure.
pub async fn current_conditions(fetch: &dyn Fetch, api_key: &str, city: &str) -> String {
    let params = [
        ("q", city.to_string()),
        ("appid", api_key.to_string()),
        ("units", "metric".to_string()),
    ];

    let Ok(value) = fetch.fetch(Endpoint::Current, &params).await else {
        return CURRENT_UNAVAILABLE.to_string();
    };
    let Ok(parsed) = serde_json::from_value::<CurrentResponse>(value) else {
        return CURRENT_UNAVAILABLE.to_string();
    };

    let description = parsed
        .weather
        .first()
        .map(|w| capitalize(&w.description))
        .unwrap_or_else(|| "Unknown".to_string());

    format!(
        "Weather: {description}\nTemperature: {}°C\nHumidity: {}%\nWind Speed: {} m/s",
        parsed.main.temp, parsed.main.humidity, parsed.wind.speed,
    )
}

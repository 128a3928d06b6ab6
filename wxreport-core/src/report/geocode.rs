use crate::{
    fetch::{Endpoint, Fetch},
    model::Coordinate,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GeoResult {
    lat: f64,
    lon: f64,
}

/// Resolve a free-text city name to coordinates via the geocoding endpoint.
/// A fetch failure, a malformed body, or an empty result list all come back
/// as `None`; the caller treats that as "city not found".
pub async fn resolve_city(fetch: &dyn Fetch, api_key: &str, city: &str) -> Option<Coordinate> {
    let params = [
        ("q", city.to_string()),
        ("limit", "1".to_string()),
        ("appid", api_key.to_string()),
    ];

    let value = fetch.fetch(Endpoint::Geocode, &params).await.ok()?;
    let results: Vec<GeoResult> = serde_json::from_value(value).ok()?;
    let first = results.first()?;

    Some(Coordinate {
        latitude: first.lat,
        longitude: first.lon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StubFetch;
    use serde_json::json;

    #[tokio::test]
    async fn resolves_first_match() {
        let stub = StubFetch::new().with(
            Endpoint::Geocode,
            json!([
                { "name": "London", "lat": 51.5073, "lon": -0.1276 },
                { "name": "London", "lat": 42.9836, "lon": -81.2497 }
            ]),
        );

        let coord = resolve_city(&stub, "KEY", "London").await.expect("coordinate");

        assert_eq!(coord.latitude, 51.5073);
        assert_eq!(coord.longitude, -0.1276);
    }

    #[tokio::test]
    async fn empty_result_list_is_not_found() {
        let stub = StubFetch::new().with(Endpoint::Geocode, json!([]));

        assert!(resolve_city(&stub, "KEY", "Nowhere").await.is_none());
    }

    #[tokio::test]
    async fn fetch_failure_is_not_found() {
        let stub = StubFetch::new();

        assert!(resolve_city(&stub, "KEY", "London").await.is_none());
    }

    #[tokio::test]
    async fn malformed_body_is_not_found() {
        let stub = StubFetch::new().with(Endpoint::Geocode, json!({ "cod": "400" }));

        assert!(resolve_city(&stub, "KEY", "London").await.is_none());
    }

    #[tokio::test]
    async fn sends_city_and_limit() {
        let stub = StubFetch::new().with(Endpoint::Geocode, json!([]));

        let _ = resolve_city(&stub, "KEY", "London").await;

        let calls = stub.calls.lock().expect("calls");
        let (_, params) = &calls[0];
        assert!(params.contains(&("q".to_string(), "London".to_string())));
        assert!(params.contains(&("limit".to_string(), "1".to_string())));
    }
}

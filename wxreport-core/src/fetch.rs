use crate::config::Endpoints;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt::Debug;
use thiserror::Error;

/// The four outbound endpoints the engine talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Geocode,
    Current,
    Forecast,
    Historical,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Geocode => "geocode",
            Endpoint::Current => "current",
            Endpoint::Forecast => "forecast",
            Endpoint::Historical => "historical",
        }
    }

    pub const fn all() -> &'static [Endpoint] {
        &[
            Endpoint::Geocode,
            Endpoint::Current,
            Endpoint::Forecast,
            Endpoint::Historical,
        ]
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed outbound call. Terminal for that call: callers degrade to a
/// placeholder instead of retrying.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to send {endpoint} request: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: Endpoint,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse {endpoint} response as JSON: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            FetchError::Transport { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Decode { endpoint, .. } => *endpoint,
        }
    }
}

/// Single chokepoint for outbound HTTP. The engine only ever sees this
/// trait, so tests substitute fixture-backed implementations.
#[async_trait]
pub trait Fetch: Send + Sync + Debug {
    async fn fetch(&self, endpoint: Endpoint, params: &[(&str, String)])
    -> Result<Value, FetchError>;
}

/// Live implementation backed by reqwest. One GET per call, no retries,
/// transport-default timeouts.
#[derive(Debug, Clone)]
pub struct HttpFetch {
    http: Client,
    endpoints: Endpoints,
}

impl HttpFetch {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            http: Client::new(),
            endpoints,
        }
    }

    fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Geocode => &self.endpoints.geocode,
            Endpoint::Current => &self.endpoints.current,
            Endpoint::Forecast => &self.endpoints.forecast,
            Endpoint::Historical => &self.endpoints.historical,
        }
    }

    async fn fetch_inner(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<Value, FetchError> {
        let res = self
            .http
            .get(self.url(endpoint))
            .query(params)
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }
}

#[async_trait]
impl Fetch for HttpFetch {
    async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<Value, FetchError> {
        let result = self.fetch_inner(endpoint, params).await;

        if let Err(err) = &result {
            tracing::error!(endpoint = %endpoint, "fetch failed: {err}");
        }

        result
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Fixture-backed `Fetch` for engine tests. Endpoints without a canned
    /// response fail with a 503, standing in for a provider outage.
    #[derive(Debug, Default)]
    pub struct StubFetch {
        responses: HashMap<Endpoint, Value>,
        pub calls: Mutex<Vec<(Endpoint, Vec<(String, String)>)>>,
    }

    impl StubFetch {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, endpoint: Endpoint, response: Value) -> Self {
            self.responses.insert(endpoint, response);
            self
        }

        pub fn called_endpoints(&self) -> Vec<Endpoint> {
            self.calls
                .lock()
                .expect("calls lock")
                .iter()
                .map(|(endpoint, _)| *endpoint)
                .collect()
        }
    }

    #[async_trait]
    impl Fetch for StubFetch {
        async fn fetch(
            &self,
            endpoint: Endpoint,
            params: &[(&str, String)],
        ) -> Result<Value, FetchError> {
            let recorded = params
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect();
            self.calls
                .lock()
                .expect("calls lock")
                .push((endpoint, recorded));

            self.responses
                .get(&endpoint)
                .cloned()
                .ok_or(FetchError::Status {
                    endpoint,
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    body: "stubbed outage".to_string(),
                })
        }
    }

    // Lets a test hand the composer a fetcher while keeping a handle on the
    // recorded calls.
    #[async_trait]
    impl Fetch for std::sync::Arc<StubFetch> {
        async fn fetch(
            &self,
            endpoint: Endpoint,
            params: &[(&str, String)],
        ) -> Result<Value, FetchError> {
            self.as_ref().fetch(endpoint, params).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_as_str_is_distinct() {
        let mut seen = std::collections::HashSet::new();
        for endpoint in Endpoint::all() {
            assert!(seen.insert(endpoint.as_str()));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn fetch_error_names_the_endpoint() {
        let err = FetchError::Status {
            endpoint: Endpoint::Forecast,
            status: StatusCode::NOT_FOUND,
            body: "{}".to_string(),
        };

        assert_eq!(err.endpoint(), Endpoint::Forecast);
        assert!(err.to_string().contains("forecast"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let short = truncate_body(&long);

        assert!(short.len() <= 203);
        assert!(short.ends_with("..."));
        assert_eq!(truncate_body("ok"), "ok");
    }

    #[tokio::test]
    async fn stub_without_response_reports_outage() {
        let stub = testing::StubFetch::new();
        let err = stub.fetch(Endpoint::Current, &[]).await.unwrap_err();

        assert_eq!(err.endpoint(), Endpoint::Current);
        assert!(err.to_string().contains("503"));
    }
}

//! HTTP client for the journey-planning backend.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::domain::RawTrip;

use super::TripBackend;
use super::error::{QueryError, excerpt};
use super::types::{TripRequest, parse_trips};

/// Default base URL of the trip backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Path of the trip search endpoint.
const GET_TRIP_PATH: &str = "/api/get-trip";

/// Configuration for the HTTP backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, without the endpoint path
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full URL of the trip endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GET_TRIP_PATH)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Trip backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTripBackend {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTripBackend {
    /// Create a new client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TripBackend for HttpTripBackend {
    fn fetch_trips(
        &self,
        request: TripRequest,
    ) -> impl Future<Output = Result<Vec<RawTrip>, QueryError>> + Send + 'static {
        debug!(
            from = %request.from.name,
            to = %request.to.name,
            has_monthly_card = request.has_monthly_card,
            "POST {}", self.endpoint
        );

        // Built now so the request is fully formed at issue time; the
        // returned future only performs the I/O.
        let pending = self.http.post(&self.endpoint).json(&request);

        async move {
            let response = pending.send().await?;
            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(QueryError::Server {
                    status: status.as_u16(),
                    message: excerpt(&body),
                });
            }

            let body = response.text().await?;
            parse_trips(&body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    use crate::domain::{QueryParameters, StationDirectory};

    /// Serve `app` on an ephemeral local port and return its base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    fn backend(base_url: String) -> HttpTripBackend {
        HttpTripBackend::new(BackendConfig::new(base_url).with_timeout(5)).unwrap()
    }

    fn request(params: QueryParameters) -> TripRequest {
        TripRequest::from_params(&params, &StationDirectory::builtin()).unwrap()
    }

    #[tokio::test]
    async fn error_status_is_server_error() {
        let app = Router::new().route(
            GET_TRIP_PATH,
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let client = backend(serve(app).await);

        let err = client
            .fetch_trips(request(QueryParameters::default()))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::Server {
                status: 503,
                message: "down".into()
            }
        );
    }

    #[tokio::test]
    async fn non_array_body_is_malformed() {
        let app = Router::new().route(GET_TRIP_PATH, post(|| async { Json(json!({"x": 1})) }));
        let client = backend(serve(app).await);

        let err = client
            .fetch_trips(request(QueryParameters::default()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[tokio::test]
    async fn posts_stations_and_fare_flag() {
        let received: Arc<Mutex<Option<Value>>> = Arc::default();
        let app = Router::new().route(
            GET_TRIP_PATH,
            post({
                let received = Arc::clone(&received);
                move |Json(body): Json<Value>| {
                    *received.lock().unwrap() = Some(body);
                    async { Json(json!([])) }
                }
            }),
        );
        let client = backend(serve(app).await);

        let trips = client
            .fetch_trips(request(QueryParameters::new(0, 2, false)))
            .await
            .unwrap();
        assert!(trips.is_empty());

        let body = received.lock().unwrap().take().unwrap();
        assert_eq!(
            body,
            json!({
                "from": {"name": "Oslo S", "latitude": 59.9109078, "longitude": 10.7505334},
                "to": {"name": "Lysaker stasjon", "latitude": 59.9130584, "longitude": 10.6375508},
                "hasMonthlyCard": false
            })
        );
    }

    #[test]
    fn config_builder() {
        let config = BackendConfig::new("http://localhost:9000").with_timeout(5);

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = BackendConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn endpoint_joins_path() {
        assert_eq!(
            BackendConfig::new("http://localhost:9000/").endpoint(),
            "http://localhost:9000/api/get-trip"
        );
        assert_eq!(
            BackendConfig::new("http://localhost:9000").endpoint(),
            "http://localhost:9000/api/get-trip"
        );
    }

    #[test]
    fn client_creation() {
        let client = HttpTripBackend::new(BackendConfig::default()).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:8080/api/get-trip");
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let client =
            HttpTripBackend::new(BackendConfig::new("http://127.0.0.1:9").with_timeout(2))
                .unwrap();
        let directory = crate::domain::StationDirectory::builtin();
        let request =
            TripRequest::from_params(&crate::domain::QueryParameters::default(), &directory)
                .unwrap();

        let err = client.fetch_trips(request).await.unwrap_err();
        assert_eq!(err.kind(), "transport");
    }
}

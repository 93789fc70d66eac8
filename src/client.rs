use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use flate2::read::GzDecoder;
use reqwest::header::{HeaderValue, ACCEPT_ENCODING, CONTENT_ENCODING};
use reqwest::{Client, Method, Request, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::types::{Event, GetEventsResponse, MissingField};

const DEFAULT_BASE_URL: &str = "https://gamma-api.polymarket.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum GammaError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("failed to create request: {0}")]
    Request(#[from] url::ParseError),

    #[error("failed to make request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to fetch events: {status} - {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decompress response body: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("validation failed for event {index}: {source}")]
    EventValidation { index: usize, source: MissingField },

    #[error("validation failed for market {market_index} in event {event_index}: {source}")]
    MarketValidation {
        event_index: usize,
        market_index: usize,
        source: MissingField,
    },
}

pub type Result<T> = std::result::Result<T, GammaError>;

/// Sends a single HTTP request.
///
/// The client shares one transport across every call, so implementations
/// must be safe for concurrent reuse. `reqwest::Client` already is; tests
/// can inject a stub here instead of standing up a real server.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: Request,
    ) -> std::result::Result<reqwest::Response, reqwest::Error>;
}

#[async_trait]
impl Transport for Client {
    async fn execute(
        &self,
        request: Request,
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        Client::execute(self, request).await
    }
}

/// Construction-time configuration for [`GammaClient`].
///
/// Everything is optional; `GammaConfig::default()` targets the public
/// Gamma endpoint with a 30s per-request timeout.
#[derive(Default)]
pub struct GammaConfig {
    /// Base URL of the Gamma service.
    pub base_url: Option<String>,
    /// Per-request timeout, used only when the client builds its own
    /// transport. Ignored when `transport` or `http_client` is supplied.
    pub timeout: Option<Duration>,
    /// Custom transport. Takes precedence over `http_client`.
    pub transport: Option<Arc<dyn Transport>>,
    /// Custom reqwest client, e.g. one with proxy or TLS settings.
    pub http_client: Option<Client>,
}

/// Polymarket Gamma API client.
///
/// Holds read-only configuration plus a shared transport with its own
/// connection pooling, so it is safe to share across tasks. Every call is
/// one GET against `{base_url}/events`; there are no retries and no
/// partial results.
pub struct GammaClient {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl GammaClient {
    pub fn new(config: GammaConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let transport: Arc<dyn Transport> = if let Some(transport) = config.transport {
            transport
        } else if let Some(client) = config.http_client {
            Arc::new(client)
        } else {
            let timeout = config.timeout.unwrap_or(DEFAULT_TIMEOUT);
            let client = Client::builder()
                .timeout(timeout)
                .build()
                .map_err(GammaError::ClientBuild)?;
            Arc::new(client)
        };

        Ok(Self {
            base_url,
            transport,
        })
    }

    /// Fetch events by their IDs. One repeated `id` parameter per input,
    /// in input order; any service-side limit on the count applies as-is.
    pub async fn get_events_by_ids(&self, ids: &[u64]) -> Result<GetEventsResponse> {
        self.get_events(ids_params(ids)).await
    }

    /// Fetch a page of events ordered by id, ascending or descending.
    pub async fn get_events_by_page(
        &self,
        offset: u64,
        limit: u64,
        ascending: bool,
    ) -> Result<GetEventsResponse> {
        self.get_events(page_params(offset, limit, ascending)).await
    }

    /// Fetch a page of non-closed events ordered by id.
    pub async fn get_active_events_by_page(
        &self,
        offset: u64,
        limit: u64,
        ascending: bool,
    ) -> Result<GetEventsResponse> {
        self.get_events(active_page_params(offset, limit, ascending))
            .await
    }

    fn build_request(&self, params: &[(String, String)]) -> Result<Request> {
        let mut url = Url::parse(&format!("{}/events", self.base_url))?;

        // Only a non-empty parameter set adds a `?`
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        let mut request = Request::new(Method::GET, url);
        request
            .headers_mut()
            .insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        Ok(request)
    }

    /// Shared fetch path for all event queries.
    async fn get_events(&self, params: Vec<(String, String)>) -> Result<GetEventsResponse> {
        let request = self.build_request(&params)?;

        debug!("Fetching events from {}", request.url());

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(GammaError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: an unreadable body must not mask the status error
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GammaError::Status { status, body });
        }

        let gzipped = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("gzip"))
            .unwrap_or(false);

        let body = response.bytes().await.map_err(GammaError::BodyRead)?;

        let events: Vec<Event> = if gzipped {
            let mut decoded = Vec::new();
            GzDecoder::new(body.as_ref())
                .read_to_end(&mut decoded)
                .map_err(GammaError::Decompress)?;
            serde_json::from_slice(&decoded)?
        } else {
            serde_json::from_slice(&body)?
        };

        // Fail fast on the first invalid record, with its position
        for (i, event) in events.iter().enumerate() {
            event
                .validate()
                .map_err(|source| GammaError::EventValidation { index: i, source })?;

            for (j, market) in event.markets.iter().enumerate() {
                market
                    .validate()
                    .map_err(|source| GammaError::MarketValidation {
                        event_index: i,
                        market_index: j,
                        source,
                    })?;
            }
        }

        debug!("Fetched {} events", events.len());

        Ok(GetEventsResponse { events })
    }
}

fn ids_params(ids: &[u64]) -> Vec<(String, String)> {
    ids.iter()
        .map(|id| ("id".to_string(), id.to_string()))
        .collect()
}

fn page_params(offset: u64, limit: u64, ascending: bool) -> Vec<(String, String)> {
    vec![
        ("offset".to_string(), offset.to_string()),
        ("limit".to_string(), limit.to_string()),
        ("ascending".to_string(), ascending.to_string()),
        // The service has accepted both names for the sort key; set both
        ("order".to_string(), "id".to_string()),
        ("sortBy".to_string(), "id".to_string()),
    ]
}

fn active_page_params(offset: u64, limit: u64, ascending: bool) -> Vec<(String, String)> {
    let mut params = page_params(offset, limit, ascending);
    // polymarket doesn't seem to use the `active` column
    params.push(("closed".to_string(), "false".to_string()));
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_base(base: &str) -> GammaClient {
        GammaClient::new(GammaConfig {
            base_url: Some(base.to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_default_base_url() {
        let client = GammaClient::new(GammaConfig::default()).unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_ids_params_one_per_id_in_input_order() {
        let params = ids_params(&[7, 1, 42]);
        assert_eq!(
            params,
            vec![
                ("id".to_string(), "7".to_string()),
                ("id".to_string(), "1".to_string()),
                ("id".to_string(), "42".to_string()),
            ]
        );
    }

    #[test]
    fn test_repeated_id_params_preserve_order_in_url() {
        let client = client_with_base("https://example.com");
        let request = client.build_request(&ids_params(&[7, 1, 42])).unwrap();
        assert_eq!(request.url().query(), Some("id=7&id=1&id=42"));
    }

    #[test]
    fn test_page_params_set_sort_key_and_direction() {
        let params = page_params(0, 10, true);
        assert!(params.contains(&("offset".to_string(), "0".to_string())));
        assert!(params.contains(&("limit".to_string(), "10".to_string())));
        assert!(params.contains(&("ascending".to_string(), "true".to_string())));
        assert!(params.contains(&("order".to_string(), "id".to_string())));
        assert!(params.contains(&("sortBy".to_string(), "id".to_string())));

        let params = page_params(5, 20, false);
        assert!(params.contains(&("ascending".to_string(), "false".to_string())));
    }

    #[test]
    fn test_active_page_filters_on_closed_not_active() {
        let params = active_page_params(0, 10, true);
        assert!(params.contains(&("closed".to_string(), "false".to_string())));
        assert!(!params.iter().any(|(key, _)| key == "active"));
    }

    #[test]
    fn test_empty_params_add_no_query() {
        let client = client_with_base("https://example.com");
        let request = client.build_request(&[]).unwrap();
        assert_eq!(request.url().as_str(), "https://example.com/events");
        assert_eq!(request.url().query(), None);
    }

    #[test]
    fn test_requests_declare_gzip_acceptance() {
        let client = client_with_base("https://example.com");
        let request = client.build_request(&[]).unwrap();
        assert_eq!(request.headers().get(ACCEPT_ENCODING).unwrap(), "gzip");
    }

    #[test]
    fn test_invalid_base_url_is_a_request_error() {
        let client = client_with_base("not a url");
        let err = client.build_request(&[]).unwrap_err();
        assert!(matches!(err, GammaError::Request(_)));
    }
}

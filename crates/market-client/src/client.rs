//! HTTP client for the CONEXA marketplace API.
//!
//! Offers and requests are served as `{ "data": [...] }` envelopes. The
//! client keeps listings opaque and leaves role handling to
//! [`conexa_core::market::MarketDataAggregator`].

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;

use conexa_core::errors::{Error, Result};
use conexa_core::market::{ListingEnvelope, MarketService};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL of the marketplace API.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

const OFFERS_PATH: &str = "/api/market/offers";
const REQUESTS_PATH: &str = "/api/market/requests";

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Market API Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the marketplace listing endpoints.
///
/// # Example
///
/// ```ignore
/// let client = MarketApiClient::new("https://api.conexa.example", Some("token"))?;
/// let offers = client.get_offers().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MarketApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: Option<HeaderValue>,
}

impl MarketApiClient {
    /// Create a client with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the access token cannot be used as a header value
    /// or the HTTP client cannot be initialized.
    pub fn new(base_url: &str, access_token: Option<&str>) -> Result<Self> {
        Self::with_timeout(
            base_url,
            access_token,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        base_url: &str,
        access_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let auth_header = access_token
            .filter(|token| !token.is_empty())
            .map(|token| {
                HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                    Error::InvalidConfigValue(format!("Invalid access token format: {}", e))
                })
            })
            .transpose()?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(auth) = &self.auth_header {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        headers
    }

    /// GET a listing endpoint and decode its envelope.
    async fn get_listings(&self, path: &str) -> Result<ListingEnvelope> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[MarketApi] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {} failed: {}", path, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response: {}", e)))?;

        let envelope = parse_envelope(status, &body)?;
        info!(
            "[MarketApi] {} returned {} listings",
            path,
            envelope.data.as_ref().map_or(0, Vec::len)
        );
        Ok(envelope)
    }
}

/// Turn a status and body into an envelope, surfacing API error messages.
fn parse_envelope(status: StatusCode, body: &str) -> Result<ListingEnvelope> {
    if !status.is_success() {
        if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(body) {
            if let Some(msg) = err.message.or(err.error) {
                return Err(Error::Api(msg));
            }
        }
        return Err(Error::Api(format!(
            "HTTP {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        )));
    }

    serde_json::from_str(body)
        .map_err(|e| Error::Api(format!("Failed to parse response: {}", e)))
}

#[async_trait]
impl MarketService for MarketApiClient {
    async fn get_offers(&self) -> Result<ListingEnvelope> {
        self.get_listings(OFFERS_PATH).await
    }

    async fn get_requests(&self) -> Result<ListingEnvelope> {
        self.get_listings(REQUESTS_PATH).await
    }
}

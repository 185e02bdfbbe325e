//! Minimal JSON-over-HTTP client shared by the providers.

use crate::Result;
use ohno::IntoAppError;
use reqwest::header::HeaderMap;

const LOG_TARGET: &str = "   client";

/// User agent sent with every provider request.
pub const USER_AGENT: &str = "repo-pulse";

/// A provider endpoint: an HTTP client plus the base URL all paths are resolved against.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a client that sends `headers` with every request.
    pub fn new(headers: HeaderMap, base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `path` and parse the body as JSON.
    ///
    /// A non-success status yields `Ok(None)`. Connection failures and bodies that
    /// are not JSON are returned as errors. Nothing is retried.
    pub async fn fetch_json(&self, path: &str) -> Result<Option<serde_json::Value>> {
        let url = format!("{}{path}", self.base_url);
        log::debug!(target: LOG_TARGET, "GET {url}");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .into_app_err_with(|| format!("sending HTTP request to {url}"))?;

        let status = response.status();
        if !status.is_success() {
            log::debug!(target: LOG_TARGET, "HTTP status {status} from {url}, treating as no data");
            return Ok(None);
        }

        let value = response
            .json::<serde_json::Value>()
            .await
            .into_app_err_with(|| format!("decoding JSON response from {url}"))?;

        Ok(Some(value))
    }
}

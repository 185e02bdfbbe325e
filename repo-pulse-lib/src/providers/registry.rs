//! npm downloads API provider

use super::client::Client;
use crate::Result;
use reqwest::header::HeaderMap;

/// Public npm downloads API endpoint.
pub const NPM_BASE_URL: &str = "https://api.npmjs.org";

#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
}

impl RegistryClient {
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        Ok(Self {
            client: Client::new(HeaderMap::new(), base_url.unwrap_or(NPM_BASE_URL))?,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Per-day download counts covering the last month.
    pub async fn downloads_last_month(&self, package: &str) -> Result<Option<serde_json::Value>> {
        self.client
            .fetch_json(&format!("/downloads/range/last-month/{package}"))
            .await
    }

    /// Total downloads over the last week as a single point value.
    pub async fn downloads_last_week(&self, package: &str) -> Result<Option<serde_json::Value>> {
        self.client
            .fetch_json(&format!("/downloads/point/last-week/{package}"))
            .await
    }
}

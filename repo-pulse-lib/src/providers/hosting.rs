//! GitHub REST API provider
//!
//! Path builders for the repository, commit, release, and contributor endpoints.
//! Responses are returned as raw JSON; shaping decides what to keep.

use super::client::Client;
use super::repo_slug::RepoSlug;
use crate::Result;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};

/// Public GitHub API endpoint.
pub const GITHUB_BASE_URL: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const COMMITS_PER_PAGE: u8 = 20;
const RELEASES_PER_PAGE: u8 = 8;
const CONTRIBUTORS_PER_PAGE: u8 = 12;

#[derive(Debug, Clone)]
pub struct HostingClient {
    client: Client,
}

impl HostingClient {
    /// Create a hosting client.
    ///
    /// A token only raises the rate limit; every endpoint used here is readable anonymously.
    pub fn new(token: Option<&str>, base_url: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        if let Some(t) = token.filter(|t| !t.is_empty()) {
            let mut auth_val = HeaderValue::from_str(&format!("Bearer {t}"))?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        Ok(Self {
            client: Client::new(headers, base_url.unwrap_or(GITHUB_BASE_URL))?,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub async fn repository(&self, slug: &RepoSlug) -> Result<Option<serde_json::Value>> {
        self.client.fetch_json(&format!("/repos/{slug}")).await
    }

    pub async fn commits(&self, slug: &RepoSlug) -> Result<Option<serde_json::Value>> {
        self.client
            .fetch_json(&format!("/repos/{slug}/commits?per_page={COMMITS_PER_PAGE}"))
            .await
    }

    pub async fn releases(&self, slug: &RepoSlug) -> Result<Option<serde_json::Value>> {
        self.client
            .fetch_json(&format!("/repos/{slug}/releases?per_page={RELEASES_PER_PAGE}"))
            .await
    }

    pub async fn contributors(&self, slug: &RepoSlug) -> Result<Option<serde_json::Value>> {
        self.client
            .fetch_json(&format!("/repos/{slug}/contributors?per_page={CONTRIBUTORS_PER_PAGE}"))
            .await
    }
}

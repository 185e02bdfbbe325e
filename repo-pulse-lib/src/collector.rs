use crate::Result;
use crate::providers::{HostingClient, RegistryClient, RepoSlug, fan_out};
use crate::shaping::{AggregatedPayload, ProviderResponses, shape};
use chrono::{DateTime, Utc};

const LOG_TARGET: &str = "  collect";

/// Something that can build a fresh payload.
///
/// The cache calls this on a miss; tests substitute their own implementations.
pub trait Assemble: Send + Sync {
    /// Build a payload stamped with `now`.
    fn assemble(&self, now: DateTime<Utc>) -> impl Future<Output = Result<AggregatedPayload>> + Send;
}

/// What to collect statistics for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    pub primary_repo: RepoSlug,
    pub secondary_repo: RepoSlug,
    pub package: String,
}

/// Collector for gathering statistics from every provider at once
#[derive(Debug, Clone)]
pub struct Collector {
    hosting: HostingClient,
    registry: RegistryClient,
    sources: Sources,
}

impl Collector {
    pub fn new(
        github_token: Option<&str>,
        hosting_base_url: Option<&str>,
        registry_base_url: Option<&str>,
        sources: Sources,
    ) -> Result<Self> {
        if github_token.is_none() {
            log::info!(target: LOG_TARGET, "No GitHub token configured, using the anonymous rate limit");
        }

        Ok(Self {
            hosting: HostingClient::new(github_token, hosting_base_url)?,
            registry: RegistryClient::new(registry_base_url)?,
            sources,
        })
    }

    #[must_use]
    pub const fn sources(&self) -> &Sources {
        &self.sources
    }

    /// Query every provider concurrently.
    ///
    /// Never fails: each call's failure is captured in its own outcome.
    pub async fn fetch(&self) -> ProviderResponses {
        let Sources {
            primary_repo,
            secondary_repo,
            package,
        } = &self.sources;

        let (repository, commits, releases, contributors, downloads_month, downloads_week, secondary_repository) = fan_out!(
            "repository" => self.hosting.repository(primary_repo),
            "commits" => self.hosting.commits(primary_repo),
            "releases" => self.hosting.releases(primary_repo),
            "contributors" => self.hosting.contributors(primary_repo),
            "monthly downloads" => self.registry.downloads_last_month(package),
            "weekly downloads" => self.registry.downloads_last_week(package),
            "secondary repository" => self.hosting.repository(secondary_repo),
        );

        ProviderResponses {
            repository,
            commits,
            releases,
            contributors,
            downloads_month,
            downloads_week,
            secondary_repository,
        }
    }
}

impl Assemble for Collector {
    async fn assemble(&self, now: DateTime<Utc>) -> Result<AggregatedPayload> {
        let Sources {
            primary_repo,
            secondary_repo,
            package,
        } = &self.sources;
        log::info!(target: LOG_TARGET, "Collecting statistics for '{primary_repo}', '{secondary_repo}' and package '{package}'");

        let responses = self.fetch().await;
        let payload = shape(responses, now)?;

        log::debug!(
            target: LOG_TARGET,
            "Assembled payload with {} commits, {} releases, {} contributors",
            payload.activity_feed.len(),
            payload.recent_releases.len(),
            payload.top_contributors.len()
        );

        Ok(payload)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The aggregated statistics served to the dashboard.
///
/// Unknown values are serialized as explicit `null`s; no field is ever omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPayload {
    // Primary repository
    pub stars: Option<u64>,
    pub forks: Option<u64>,
    /// Open issues plus open pull requests, as GitHub reports them.
    pub open_issues: Option<u64>,
    pub watchers: Option<u64>,
    /// Repository size in KiB.
    pub repo_size: Option<u64>,
    pub language: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub default_branch: Option<String>,
    pub description: Option<String>,

    // Secondary repository
    pub secondary_stars: Option<u64>,
    pub secondary_forks: Option<u64>,

    // Package registry
    pub downloads_month: u64,
    pub downloads_week: u64,
    pub downloads_chart: Vec<WeeklyDownloadBucket>,

    // Activity
    pub commit_chart: Vec<DailyCount>,
    pub activity_feed: Vec<ActivityEntry>,
    pub recent_releases: Vec<ReleaseEntry>,
    pub top_contributors: Vec<ContributorEntry>,

    pub fetched_at: DateTime<Utc>,

    /// Set only when a refresh failed and an older payload is served instead.
    pub stale: bool,
}

/// Number of commits authored on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub count: u64,
}

/// Downloads summed over a run of up to seven consecutive days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyDownloadBucket {
    /// First day of the run.
    pub date: String,
    pub downloads: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub message: String,
    pub date: Option<String>,
    /// Abbreviated commit hash.
    pub sha: Option<String>,
    pub author: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    pub tag: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorEntry {
    pub login: Option<String>,
    pub avatar: Option<String>,
    pub contributions: Option<u64>,
    pub url: Option<String>,
}

impl AggregatedPayload {
    /// A copy of this payload flagged as stale.
    #[must_use]
    pub fn to_stale(&self) -> Self {
        Self {
            stale: true,
            ..self.clone()
        }
    }
}

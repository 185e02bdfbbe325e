//! Shaping raw provider responses into the dashboard payload
//!
//! Everything here is pure: no I/O, no clocks, no shared state. The entry point is
//! [`shape`], which decodes each provider outcome and applies the defaulting table
//! below, so every field of [`AggregatedPayload`] has exactly one declared fallback.
//!
//! | field | source | fallback |
//! |---|---|---|
//! | `stars`, `forks`, `openIssues`, `watchers`, `repoSize` | primary repository | `null` |
//! | `language`, `createdAt`, `updatedAt`, `defaultBranch`, `description` | primary repository | `null` |
//! | `secondaryStars`, `secondaryForks` | secondary repository | `null` |
//! | `downloadsMonth` | monthly download range | `0` |
//! | `downloadsWeek` | last-week download point | `0` |
//! | `downloadsChart` | monthly download range | `[]` |
//! | `commitChart`, `activityFeed` | commits | `[]` |
//! | `recentReleases` | releases | `[]` |
//! | `topContributors` | contributors | `[]` |
//!
//! Missing data never fails shaping: a failed call, a non-success status, an absent
//! field, and a JSON `null` all fall back. A response whose structure contradicts
//! the provider's documented shape (say, an object where a list belongs) is
//! reported as an error.

mod feed;
mod payload;
mod records;
mod series;

pub use feed::{MAX_FEED_ENTRIES, MAX_MESSAGE_CHARS, activity_feed, contributors, releases};
pub use payload::{ActivityEntry, AggregatedPayload, ContributorEntry, DailyCount, ReleaseEntry, WeeklyDownloadBucket};
pub use records::{
    AccountRecord, CommitDetail, CommitRecord, CommitSignature, ContributorRecord, DailyDownloads, DownloadRange, PointDownloads,
    RawCommit, ReleaseRecord, RepositoryRecord,
};
pub use series::{DAYS_PER_BUCKET, daily_histogram, monthly_total, weekly_buckets, weekly_total};

use crate::Result;
use crate::providers::ProviderOutcome;
use chrono::{DateTime, Utc};
use ohno::IntoAppError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Raw outcomes of every provider call that feeds the payload.
#[derive(Debug, Clone)]
pub struct ProviderResponses {
    pub repository: ProviderOutcome<Value>,
    pub commits: ProviderOutcome<Value>,
    pub releases: ProviderOutcome<Value>,
    pub contributors: ProviderOutcome<Value>,
    pub downloads_month: ProviderOutcome<Value>,
    pub downloads_week: ProviderOutcome<Value>,
    pub secondary_repository: ProviderOutcome<Value>,
}

/// Build the payload from provider outcomes.
pub fn shape(responses: ProviderResponses, fetched_at: DateTime<Utc>) -> Result<AggregatedPayload> {
    let repo = decode::<RepositoryRecord>("repository", responses.repository)?.unwrap_or_default();
    let secondary = decode::<RepositoryRecord>("secondary repository", responses.secondary_repository)?.unwrap_or_default();

    let commits: Vec<RawCommit> = decode::<Vec<CommitRecord>>("commits", responses.commits)?
        .unwrap_or_default()
        .into_iter()
        .map(RawCommit::from)
        .collect();

    let release_records = decode::<Vec<ReleaseRecord>>("releases", responses.releases)?.unwrap_or_default();
    let contributor_records = decode::<Vec<ContributorRecord>>("contributors", responses.contributors)?.unwrap_or_default();

    let daily_downloads = decode::<DownloadRange>("monthly downloads", responses.downloads_month)?
        .and_then(|range| range.downloads)
        .unwrap_or_default();
    let week_point = decode::<PointDownloads>("weekly downloads", responses.downloads_week)?;

    Ok(AggregatedPayload {
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        open_issues: repo.open_issues_count,
        watchers: repo.subscribers_count,
        repo_size: repo.size,
        language: repo.language,
        created_at: repo.created_at,
        updated_at: repo.updated_at,
        default_branch: repo.default_branch,
        description: repo.description,

        secondary_stars: secondary.stargazers_count,
        secondary_forks: secondary.forks_count,

        downloads_month: monthly_total(&daily_downloads),
        downloads_week: weekly_total(week_point.as_ref()),
        downloads_chart: weekly_buckets(&daily_downloads),

        commit_chart: daily_histogram(&commits),
        activity_feed: activity_feed(&commits),
        recent_releases: releases(release_records),
        top_contributors: contributors(contributor_records),

        fetched_at,
        stale: false,
    })
}

/// Decode a provider outcome into a typed record.
///
/// Failed calls, absent results, and `null` bodies produce `Ok(None)`.
fn decode<T: DeserializeOwned>(what: &str, outcome: ProviderOutcome<Value>) -> Result<Option<T>> {
    match outcome.into_value() {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .into_app_err_with(|| format!("unexpected {what} response shape")),
    }
}

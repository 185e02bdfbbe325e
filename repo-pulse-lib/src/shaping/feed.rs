//! List projections: activity feed, releases, contributors.

use super::payload::{ActivityEntry, ContributorEntry, ReleaseEntry};
use super::records::{ContributorRecord, RawCommit, ReleaseRecord};

/// Maximum number of entries in the activity feed.
pub const MAX_FEED_ENTRIES: usize = 12;

/// Maximum length of a feed message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 120;

const SHORT_SHA_LEN: usize = 7;
const FALLBACK_MESSAGE: &str = "Commit";
const FALLBACK_AUTHOR: &str = "unknown";

/// Turn the newest commits into feed entries, keeping provider order.
#[must_use]
pub fn activity_feed(commits: &[RawCommit]) -> Vec<ActivityEntry> {
    commits.iter().take(MAX_FEED_ENTRIES).map(activity_entry).collect()
}

fn activity_entry(commit: &RawCommit) -> ActivityEntry {
    let message: String = commit
        .message_first_line
        .as_deref()
        .unwrap_or_default()
        .chars()
        .take(MAX_MESSAGE_CHARS)
        .collect();

    ActivityEntry {
        message: if message.is_empty() { FALLBACK_MESSAGE.to_string() } else { message },
        date: non_empty(commit.author_date.as_ref()),
        sha: commit.sha.as_deref().map(|sha| sha.chars().take(SHORT_SHA_LEN).collect()),
        author: non_empty(commit.author_login.as_ref())
            .or_else(|| non_empty(commit.author_name.as_ref()))
            .unwrap_or_else(|| FALLBACK_AUTHOR.to_string()),
        avatar: non_empty(commit.avatar_url.as_ref()),
    }
}

#[must_use]
pub fn releases(records: Vec<ReleaseRecord>) -> Vec<ReleaseEntry> {
    records
        .into_iter()
        .map(|r| ReleaseEntry {
            tag: r.tag_name,
            name: r.name,
            date: r.published_at,
            url: r.html_url,
        })
        .collect()
}

#[must_use]
pub fn contributors(records: Vec<ContributorRecord>) -> Vec<ContributorEntry> {
    records
        .into_iter()
        .map(|c| ContributorEntry {
            login: c.login,
            avatar: c.avatar_url,
            contributions: c.contributions,
            url: c.html_url,
        })
        .collect()
}

fn non_empty(s: Option<&String>) -> Option<String> {
    s.filter(|s| !s.is_empty()).cloned()
}

//! Time series derived from commits and download counts.

use super::payload::{DailyCount, WeeklyDownloadBucket};
use super::records::{DailyDownloads, PointDownloads, RawCommit};
use std::collections::BTreeMap;

/// Number of days folded into one download bucket.
pub const DAYS_PER_BUCKET: usize = 7;

/// Length of an ISO `YYYY-MM-DD` day prefix.
const DAY_PREFIX_LEN: usize = 10;

/// Count commits per calendar day, ascending by day.
///
/// The day is the literal leading `YYYY-MM-DD` of the author timestamp, in whatever
/// offset the provider reported it; no timezone conversion takes place. Commits
/// without a timestamp are left out.
#[must_use]
pub fn daily_histogram(commits: &[RawCommit]) -> Vec<DailyCount> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    for date in commits.iter().filter_map(|c| c.author_date.as_deref()) {
        let day: String = date.chars().take(DAY_PREFIX_LEN).collect();
        if !day.is_empty() {
            *counts.entry(day).or_default() += 1;
        }
    }

    counts.into_iter().map(|(date, count)| DailyCount { date, count }).collect()
}

/// Fold a daily download series into runs of [`DAYS_PER_BUCKET`] days.
///
/// Runs start at index 0, so the last bucket may hold fewer days. Each bucket is
/// labelled with the first day in its run that carries a date; a run with no dated
/// day is left out of the chart. Days without a count add nothing.
#[must_use]
pub fn weekly_buckets(days: &[DailyDownloads]) -> Vec<WeeklyDownloadBucket> {
    days.chunks(DAYS_PER_BUCKET)
        .filter_map(|run| {
            run.iter().find_map(|d| d.day.clone()).map(|date| WeeklyDownloadBucket {
                date,
                downloads: sum_downloads(run),
            })
        })
        .collect()
}

/// Total downloads across the whole series.
#[must_use]
pub fn monthly_total(days: &[DailyDownloads]) -> u64 {
    sum_downloads(days)
}

/// The point value of a last-week response, or 0 when absent.
#[must_use]
pub fn weekly_total(point: Option<&PointDownloads>) -> u64 {
    point.and_then(|p| p.downloads).unwrap_or(0)
}

fn sum_downloads(days: &[DailyDownloads]) -> u64 {
    days.iter().fold(0, |total, d| total.saturating_add(d.downloads.unwrap_or(0)))
}

//! Concurrent provider calls with per-call failure isolation.
//!
//! Every call is wrapped by [`isolate`], which turns a transport failure into a
//! [`ProviderOutcome::Failed`] value instead of an error. The [`fan_out!`] macro then
//! polls all wrapped calls together on the current task, so one slow or failing
//! provider never blocks or cancels its siblings, and the returned tuple lines up
//! position by position with the calls as written.

use super::ProviderOutcome;
use crate::Result;

const LOG_TARGET: &str = "  fan-out";

/// Await a provider call and capture its result as an outcome.
pub async fn isolate<T, F>(label: &str, call: F) -> ProviderOutcome<T>
where
    F: Future<Output = Result<Option<T>>>,
{
    let outcome = ProviderOutcome::from(call.await);

    match &outcome {
        ProviderOutcome::Fulfilled(Some(_)) => log::debug!(target: LOG_TARGET, "Fetched {label}"),
        ProviderOutcome::Fulfilled(None) => log::info!(target: LOG_TARGET, "No data available for {label}"),
        ProviderOutcome::Failed(e) => log::warn!(target: LOG_TARGET, "Could not fetch {label}: {e:#}"),
    }

    outcome
}

/// Run provider calls concurrently, yielding a tuple of [`ProviderOutcome`]s in call order.
///
/// ```ignore
/// let (repo, commits) = fan_out!(
///     "repository" => hosting.repository(&slug),
///     "commits" => hosting.commits(&slug),
/// );
/// ```
macro_rules! fan_out {
    ($($label:expr => $call:expr),+ $(,)?) => {
        tokio::join!($($crate::providers::isolate($label, $call)),+)
    };
}

pub(crate) use fan_out;

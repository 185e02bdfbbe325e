//! A single-slot, TTL-aware cache for the aggregated payload.
//!
//! [`StatsCache`] holds at most one [`CacheEntry`]. A read inside the TTL is served
//! straight from the slot. A read past the TTL (or with an empty slot) runs an
//! assembly; a successful one replaces the entry wholesale, a failed one falls back
//! to the previous entry, flagged as stale, no matter how old it is.
//!
//! The slot only ever holds an `Arc` that is swapped in one step, so a reader sees
//! either the previous payload or the next one, never a partially built one. Only
//! one assembly runs at a time; while it runs, other readers get the current entry
//! regardless of its age, and wait only when there is no entry at all.

use crate::Result;
use crate::collector::Assemble;
use crate::shaping::AggregatedPayload;
use chrono::{DateTime, Utc};
use core::time::Duration;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;

const LOG_TARGET: &str = "    cache";

/// Default freshness window.
pub const DEFAULT_TTL: Duration = Duration::from_mins(5);

/// The stored payload and when it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Arc<AggregatedPayload>,
    pub stored_at: DateTime<Utc>,
}

/// How a read was satisfied.
#[derive(Debug, Clone)]
pub enum CacheOutcome {
    /// Assembled during this read.
    Fresh(Arc<AggregatedPayload>),

    /// Served from the slot without calling any provider.
    Cached(Arc<AggregatedPayload>),

    /// Assembly failed; this is the last good payload, flagged as stale.
    Stale(Arc<AggregatedPayload>),
}

impl CacheOutcome {
    #[must_use]
    pub fn payload(&self) -> &AggregatedPayload {
        match self {
            Self::Fresh(p) | Self::Cached(p) | Self::Stale(p) => p,
        }
    }

    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Stale(_))
    }
}

#[derive(Debug)]
pub struct StatsCache {
    ttl: Duration,
    slot: RwLock<Option<Arc<CacheEntry>>>,

    /// Serializes assemblies so concurrent misses trigger a single refresh.
    refresh: Mutex<()>,
}

impl StatsCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The current entry, whatever its age.
    #[must_use]
    pub fn peek(&self) -> Option<Arc<CacheEntry>> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replace the entry with `payload`, stored at `now`.
    pub fn put(&self, payload: AggregatedPayload, now: DateTime<Utc>) -> Arc<AggregatedPayload> {
        let payload = Arc::new(payload);
        let entry = Arc::new(CacheEntry {
            payload: Arc::clone(&payload),
            stored_at: now,
        });

        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(entry);
        payload
    }

    /// Return a payload for a read at `now`, assembling a new one if the entry is missing or expired.
    ///
    /// Fails only when assembly fails and there is no earlier payload to fall back on.
    pub async fn get<A: Assemble>(&self, assembler: &A, now: DateTime<Utc>) -> Result<CacheOutcome> {
        if let Some(entry) = self.fresh_entry(now) {
            log::debug!(target: LOG_TARGET, "Cache hit (stored at {})", entry.stored_at);
            return Ok(CacheOutcome::Cached(Arc::clone(&entry.payload)));
        }

        let _refresh = match self.refresh.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                // A refresh is already running; keep serving the current entry meanwhile.
                if let Some(entry) = self.peek() {
                    log::debug!(target: LOG_TARGET, "Refresh in progress, serving entry stored at {}", entry.stored_at);
                    return Ok(CacheOutcome::Cached(Arc::clone(&entry.payload)));
                }
                self.refresh.lock().await
            }
        };

        // Another reader may have refreshed the entry while this one waited.
        if let Some(entry) = self.fresh_entry(now) {
            log::debug!(target: LOG_TARGET, "Cache refreshed by a concurrent request");
            return Ok(CacheOutcome::Cached(Arc::clone(&entry.payload)));
        }

        log::debug!(target: LOG_TARGET, "Cache miss, assembling a new payload");

        match assembler.assemble(now).await {
            Ok(payload) => Ok(CacheOutcome::Fresh(self.put(payload, now))),
            Err(e) => match self.peek() {
                Some(entry) => {
                    log::warn!(
                        target: LOG_TARGET,
                        "Could not refresh statistics, serving payload stored at {}: {e:#}",
                        entry.stored_at
                    );
                    Ok(CacheOutcome::Stale(Arc::new(entry.payload.to_stale())))
                }
                None => {
                    log::error!(target: LOG_TARGET, "Could not assemble statistics and nothing is cached: {e:#}");
                    Err(e)
                }
            },
        }
    }

    fn fresh_entry(&self, now: DateTime<Utc>) -> Option<Arc<CacheEntry>> {
        self.peek().filter(|entry| self.is_fresh(entry, now))
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        // A negative age means the entry was stored "in the future" (clock skew); treat it as fresh.
        now.signed_duration_since(entry.stored_at)
            .to_std()
            .ok()
            .is_none_or(|age| age < self.ttl)
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use ohno::app_err;

    /// Assembler that counts calls and can be switched into failure mode.
    #[derive(Debug, Default)]
    struct TestAssembler {
        calls: AtomicUsize,
        fail: core::sync::atomic::AtomicBool,
    }

    impl TestAssembler {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }
    }

    impl Assemble for TestAssembler {
        async fn assemble(&self, now: DateTime<Utc>) -> Result<AggregatedPayload> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::task::yield_now().await;

            if self.fail.load(Ordering::SeqCst) {
                return Err(app_err!("transport failure"));
            }

            Ok(AggregatedPayload {
                stars: Some(n as u64),
                fetched_at: now,
                ..AggregatedPayload::default()
            })
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_704_067_200 + secs, 0).unwrap()
    }

    #[tokio::test]
    async fn empty_cache_assembles() {
        let cache = StatsCache::default();
        let assembler = TestAssembler::default();

        let outcome = cache.get(&assembler, at(0)).await.unwrap();

        assert!(matches!(outcome, CacheOutcome::Fresh(_)));
        assert_eq!(outcome.payload().stars, Some(1));
        assert_eq!(assembler.calls(), 1);
        assert_eq!(cache.peek().unwrap().stored_at, at(0));
    }

    #[tokio::test]
    async fn read_within_ttl_makes_no_provider_calls() {
        let cache = StatsCache::default();
        let assembler = TestAssembler::default();

        let first = cache.get(&assembler, at(0)).await.unwrap();
        let second = cache.get(&assembler, at(299)).await.unwrap();

        assert_eq!(assembler.calls(), 1);
        assert!(matches!(second, CacheOutcome::Cached(_)));
        assert_eq!(first.payload(), second.payload());
    }

    #[tokio::test]
    async fn read_after_ttl_reassembles() {
        let cache = StatsCache::default();
        let assembler = TestAssembler::default();

        let _ = cache.get(&assembler, at(0)).await.unwrap();
        let outcome = cache.get(&assembler, at(300)).await.unwrap();

        assert_eq!(assembler.calls(), 2);
        assert!(matches!(outcome, CacheOutcome::Fresh(_)));
        assert_eq!(outcome.payload().stars, Some(2));
        assert_eq!(cache.peek().unwrap().stored_at, at(300));
    }

    #[tokio::test]
    async fn failure_with_seeded_entry_serves_stale() {
        let cache = StatsCache::default();
        let seeded = AggregatedPayload {
            stars: Some(4242),
            fetched_at: at(0),
            ..AggregatedPayload::default()
        };
        let _ = cache.put(seeded.clone(), at(0));

        let assembler = TestAssembler::default();
        assembler.set_failing(true);

        let outcome = cache.get(&assembler, at(3600)).await.unwrap();

        assert!(outcome.is_stale());
        assert_eq!(outcome.payload().stars, Some(4242));
        assert!(outcome.payload().stale);

        // The stored entry itself is untouched.
        let entry = cache.peek().unwrap();
        assert_eq!(*entry.payload, seeded);
        assert_eq!(entry.stored_at, at(0));
    }

    #[tokio::test]
    async fn stale_fallback_ignores_entry_age() {
        let cache = StatsCache::default();
        let assembler = TestAssembler::default();
        let _ = cache.get(&assembler, at(0)).await.unwrap();

        assembler.set_failing(true);
        let outcome = cache.get(&assembler, at(86_400 * 30)).await.unwrap();

        assert!(outcome.is_stale());
        assert_eq!(outcome.payload().stars, Some(1));
    }

    #[tokio::test]
    async fn failure_with_empty_cache_is_an_error() {
        let cache = StatsCache::default();
        let assembler = TestAssembler::default();
        assembler.set_failing(true);

        let err = cache.get(&assembler, at(0)).await.unwrap_err();

        assert!(format!("{err:#}").contains("transport failure"));
        assert!(cache.peek().is_none());
    }

    #[tokio::test]
    async fn recovery_after_failure_replaces_entry() {
        let cache = StatsCache::default();
        let assembler = TestAssembler::default();
        let _ = cache.get(&assembler, at(0)).await.unwrap();

        assembler.set_failing(true);
        assert!(cache.get(&assembler, at(600)).await.unwrap().is_stale());

        assembler.set_failing(false);
        let outcome = cache.get(&assembler, at(601)).await.unwrap();

        assert!(matches!(outcome, CacheOutcome::Fresh(_)));
        assert!(!outcome.payload().stale);
        assert_eq!(outcome.payload().stars, Some(3));
    }

    #[tokio::test]
    async fn concurrent_misses_assemble_once() {
        let cache = StatsCache::default();
        let assembler = TestAssembler::default();

        let (a, b, c) = tokio::join!(
            cache.get(&assembler, at(0)),
            cache.get(&assembler, at(0)),
            cache.get(&assembler, at(0)),
        );

        assert_eq!(assembler.calls(), 1);
        assert_eq!(a.unwrap().payload().stars, Some(1));
        assert_eq!(b.unwrap().payload().stars, Some(1));
        assert_eq!(c.unwrap().payload().stars, Some(1));
    }

    /// Assembler whose assembly never completes, announcing when it has started.
    #[derive(Debug, Default)]
    struct HungAssembler {
        started: tokio::sync::Notify,
    }

    impl Assemble for HungAssembler {
        async fn assemble(&self, _now: DateTime<Utc>) -> Result<AggregatedPayload> {
            self.started.notify_one();
            core::future::pending().await
        }
    }

    #[tokio::test]
    async fn expired_entry_is_served_while_refresh_hangs() {
        let cache = Arc::new(StatsCache::default());
        let _ = cache.put(
            AggregatedPayload {
                stars: Some(9),
                ..AggregatedPayload::default()
            },
            at(0),
        );
        let assembler = Arc::new(HungAssembler::default());

        let refresh = tokio::spawn({
            let cache = Arc::clone(&cache);
            let assembler = Arc::clone(&assembler);
            async move { cache.get(assembler.as_ref(), at(600)).await.map(|o| o.payload().stars) }
        });
        assembler.started.notified().await;

        let outcome = tokio::time::timeout(Duration::from_millis(500), cache.get(assembler.as_ref(), at(600)))
            .await
            .expect("second reader must not wait for the hung refresh")
            .unwrap();

        assert!(matches!(outcome, CacheOutcome::Cached(_)));
        assert_eq!(outcome.payload().stars, Some(9));
        assert!(!refresh.is_finished());
        refresh.abort();
    }

    #[tokio::test]
    async fn future_timestamp_is_treated_as_fresh() {
        let cache = StatsCache::default();
        let assembler = TestAssembler::default();
        let _ = cache.put(AggregatedPayload::default(), at(1000));

        let outcome = cache.get(&assembler, at(0)).await.unwrap();

        assert!(matches!(outcome, CacheOutcome::Cached(_)));
        assert_eq!(assembler.calls(), 0);
    }

    #[test]
    fn put_replaces_entry_wholesale() {
        let cache = StatsCache::new(Duration::from_secs(60));
        let _ = cache.put(
            AggregatedPayload {
                stars: Some(1),
                forks: Some(1),
                ..AggregatedPayload::default()
            },
            at(0),
        );
        let _ = cache.put(
            AggregatedPayload {
                stars: Some(2),
                ..AggregatedPayload::default()
            },
            at(10),
        );

        let entry = cache.peek().unwrap();
        assert_eq!(entry.payload.stars, Some(2));
        assert_eq!(entry.payload.forks, None);
        assert_eq!(entry.stored_at, at(10));
        assert_eq!(cache.ttl(), Duration::from_secs(60));
    }
}

//! Task Result Cache - TTL cache of repository results keyed by filter
//!
//! One cache object is built at start-up and shared by handle. Keys are
//! structured (`CacheKey`), so two filters that differ only in plant-type
//! order or duplicates share an entry. Expiry is read from an injected
//! `Clock`, which keeps TTL behaviour testable.
//!
//! Concurrent misses for the same key are not coalesced: both callers query
//! the repository and the later write wins. Queries are idempotent.

use crate::error::Result;
use crate::models::{Category, Priority, SeasonalTask, SeasonalTaskFilter};
use crate::repository::TaskRepository;
use chrono::{DateTime, Duration, Utc};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Default lifetime of a cached task collection
pub const DEFAULT_CACHE_DURATION_SECS: i64 = 60 * 60;

/// Time source for cache expiry
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(start) }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Canonical cache key for a task query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// No filter, or a filter with no fields set
    All,
    Filtered {
        month: Option<u32>,
        priority: Option<Priority>,
        category: Option<Category>,
        /// Sorted and de-duplicated
        plant_types: Option<Vec<String>>,
        climate_zone: Option<String>,
    },
}

impl CacheKey {
    pub fn from_filter(filter: Option<&SeasonalTaskFilter>) -> Self {
        let filter = match filter {
            Some(f) if !f.is_empty() => f,
            _ => return CacheKey::All,
        };

        let plant_types = filter.plant_types.as_ref().map(|types| {
            let mut types = types.clone();
            types.sort();
            types.dedup();
            types
        });

        CacheKey::Filtered {
            month: filter.month,
            priority: filter.priority,
            category: filter.category,
            plant_types,
            climate_zone: filter.climate_zone.clone(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::All => f.write_str("all"),
            CacheKey::Filtered {
                month,
                priority,
                category,
                plant_types,
                climate_zone,
            } => {
                let mut parts = Vec::new();
                if let Some(m) = month {
                    parts.push(format!("month={}", m));
                }
                if let Some(p) = priority {
                    parts.push(format!("priority={}", p));
                }
                if let Some(c) = category {
                    parts.push(format!("category={}", c));
                }
                if let Some(types) = plant_types {
                    parts.push(format!("plant_types={}", types.join(",")));
                }
                if let Some(z) = climate_zone {
                    parts.push(format!("climate_zone={}", z));
                }
                f.write_str(&parts.join("|"))
            }
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    tasks: Arc<Vec<SeasonalTask>>,
    expires_at: DateTime<Utc>,
}

/// Shared TTL cache of task collections
pub struct TaskCache {
    entries: RwLock<FxHashMap<CacheKey, CacheEntry>>,
    duration: Duration,
    clock: Arc<dyn Clock>,
}

impl Default for TaskCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskCache {
    /// One-hour TTL on the system clock
    pub fn new() -> Self {
        Self::with_clock(
            Duration::seconds(DEFAULT_CACHE_DURATION_SECS),
            Arc::new(SystemClock),
        )
    }

    pub fn with_clock(duration: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
            duration,
            clock,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Fresh entry for `key`, if any
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Vec<SeasonalTask>>> {
        let now = self.clock.now();
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| now < entry.expires_at)
            .map(|entry| Arc::clone(&entry.tasks))
    }

    /// Store `tasks` under `key`, expiring one cache duration from now
    pub fn put(&self, key: CacheKey, tasks: Vec<SeasonalTask>) -> Arc<Vec<SeasonalTask>> {
        let tasks = Arc::new(tasks);
        let entry = CacheEntry {
            tasks: Arc::clone(&tasks),
            expires_at: self.clock.now() + self.duration,
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
        tasks
    }

    /// Cached collection for `filter`, querying `repository` on miss or expiry
    pub async fn get_or_fetch<R>(
        &self,
        filter: Option<&SeasonalTaskFilter>,
        repository: &R,
    ) -> Result<Arc<Vec<SeasonalTask>>>
    where
        R: TaskRepository + ?Sized,
    {
        let key = CacheKey::from_filter(filter);

        if let Some(tasks) = self.get(&key) {
            tracing::debug!("Cache hit for tasks [{}]", key);
            return Ok(tasks);
        }

        tracing::debug!("Cache miss for tasks [{}], querying store", key);
        let tasks = repository.fetch(filter).await.map_err(|e| {
            tracing::warn!("Task query [{}] failed: {}", key, e);
            e
        })?;

        Ok(self.put(key, tasks))
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let dropped = entries.len();
        entries.clear();
        tracing::debug!("Cleared {} cached task collections", dropped);
    }

    /// Number of entries, fresh or stale
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuideError;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRepository {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingRepository {
        fn new() -> Self {
            Self { calls: AtomicUsize::new(0), fail: false }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TaskRepository for CountingRepository {
        async fn fetch(&self, _filter: Option<&SeasonalTaskFilter>) -> Result<Vec<SeasonalTask>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GuideError::Repository("store unavailable".to_string()));
            }
            Ok(Vec::new())
        }
    }

    fn manual_cache() -> (TaskCache, Arc<ManualClock>) {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let cache = TaskCache::with_clock(Duration::hours(1), clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_key_canonicalization() {
        let a = SeasonalTaskFilter::new()
            .with_month(4)
            .with_plant_types(["vegetable", "herb", "herb"]);
        let b = SeasonalTaskFilter::new()
            .with_plant_types(["herb", "vegetable"])
            .with_month(4);
        assert_eq!(CacheKey::from_filter(Some(&a)), CacheKey::from_filter(Some(&b)));
        assert_eq!(
            CacheKey::from_filter(Some(&a)).to_string(),
            "month=4|plant_types=herb,vegetable"
        );

        assert_eq!(CacheKey::from_filter(None), CacheKey::All);
        assert_eq!(CacheKey::from_filter(Some(&SeasonalTaskFilter::new())), CacheKey::All);
        assert_ne!(
            CacheKey::from_filter(Some(&SeasonalTaskFilter::new().with_month(4))),
            CacheKey::from_filter(Some(&SeasonalTaskFilter::new().with_month(5)))
        );
    }

    #[tokio::test]
    async fn test_second_get_is_served_from_cache() {
        let (cache, _clock) = manual_cache();
        let repo = CountingRepository::new();
        let filter = SeasonalTaskFilter::new().with_month(6);

        cache.get_or_fetch(Some(&filter), &repo).await.unwrap();
        cache.get_or_fetch(Some(&filter), &repo).await.unwrap();

        assert_eq!(repo.calls(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched_once() {
        let (cache, clock) = manual_cache();
        let repo = CountingRepository::new();

        cache.get_or_fetch(None, &repo).await.unwrap();
        clock.advance(Duration::minutes(59));
        cache.get_or_fetch(None, &repo).await.unwrap();
        assert_eq!(repo.calls(), 1);

        clock.advance(Duration::minutes(1));
        cache.get_or_fetch(None, &repo).await.unwrap();
        cache.get_or_fetch(None, &repo).await.unwrap();
        assert_eq!(repo.calls(), 2);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let (cache, _clock) = manual_cache();
        let repo = CountingRepository::new();

        cache.get_or_fetch(None, &repo).await.unwrap();
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
        cache.get_or_fetch(None, &repo).await.unwrap();
        assert_eq!(repo.calls(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let (cache, _clock) = manual_cache();
        let repo = CountingRepository { calls: AtomicUsize::new(0), fail: true };

        assert!(cache.get_or_fetch(None, &repo).await.is_err());
        assert!(cache.get_or_fetch(None, &repo).await.is_err());
        assert_eq!(repo.calls(), 2);
        assert!(cache.is_empty());
    }
}

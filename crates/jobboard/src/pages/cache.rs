use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::listings::PageData;

/// Degraded pages are retried sooner than healthy ones.
pub const DEGRADED_TTL: Duration = Duration::from_secs(60);

struct Entry {
    at: Instant,
    page: Arc<PageData>,
}

type Slot = Arc<Mutex<Option<Entry>>>;

/// Time-based revalidation: each path is rebuilt at most once per interval.
///
/// Callers racing on a stale path queue on that path's slot, so only the first
/// one reloads; other paths are unaffected.
pub struct PageCache {
    revalidate: Duration,
    slots: Mutex<HashMap<String, Slot>>,
}

impl PageCache {
    pub fn new(revalidate: Duration) -> Self {
        Self {
            revalidate,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn revalidate_interval(&self) -> Duration {
        self.revalidate
    }

    pub async fn get_or_load<F, Fut>(&self, path: &str, load: F) -> Arc<PageData>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PageData>,
    {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots.entry(path.to_string()).or_default().clone()
        };

        let mut entry = slot.lock().await;
        if let Some(hit) = entry.as_ref() {
            if hit.at.elapsed() < self.ttl_for(&hit.page) {
                return hit.page.clone();
            }
        }

        debug!(path, "revalidating page");
        let page = Arc::new(load().await);
        *entry = Some(Entry {
            at: Instant::now(),
            page: page.clone(),
        });
        page
    }

    /// Forces the next request for `path` to reload.
    pub async fn invalidate(&self, path: &str) {
        let slot = self.slots.lock().await.get(path).cloned();
        if let Some(slot) = slot {
            *slot.lock().await = None;
        }
    }

    fn ttl_for(&self, page: &PageData) -> Duration {
        if page.degraded {
            self.revalidate.min(DEGRADED_TTL)
        } else {
            self.revalidate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::ListingStats;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn page(path: &str, total: i64, degraded: bool) -> PageData {
        PageData {
            path: path.to_string(),
            stats: ListingStats::new(total, 0),
            companies: Vec::new(),
            jobs: Vec::new(),
            role_breakdown: Vec::new(),
            degraded,
            generated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn serves_cached_page_within_interval() {
        let cache = PageCache::new(Duration::from_secs(3600));
        let loads = AtomicUsize::new(0);

        for _ in 0..3 {
            let got = cache
                .get_or_load("fractional-jobs", || async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    page("fractional-jobs", 17, false)
                })
                .await;
            assert_eq!(got.stats.total, 17);
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_interval_reloads_every_time() {
        let cache = PageCache::new(Duration::ZERO);
        let loads = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .get_or_load("a", || async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    page("a", 1, false)
                })
                .await;
        }

        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn paths_are_cached_independently_and_can_be_invalidated() {
        let cache = PageCache::new(Duration::from_secs(3600));

        cache.get_or_load("a", || async { page("a", 1, false) }).await;
        let b = cache.get_or_load("b", || async { page("b", 2, false) }).await;
        assert_eq!(b.stats.total, 2);

        cache.invalidate("a").await;
        let a = cache.get_or_load("a", || async { page("a", 10, false) }).await;
        assert_eq!(a.stats.total, 10);

        let b = cache.get_or_load("b", || async { page("b", 20, false) }).await;
        assert_eq!(b.stats.total, 2, "b untouched by invalidating a");
    }

    #[tokio::test]
    async fn concurrent_requests_share_a_single_load() {
        let cache = PageCache::new(Duration::from_secs(3600));
        let loads = AtomicUsize::new(0);
        let load = || async {
            loads.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            page("fractional-jobs", 17, false)
        };

        let (a, b, c, d, e, f, g, h) = tokio::join!(
            cache.get_or_load("fractional-jobs", load),
            cache.get_or_load("fractional-jobs", load),
            cache.get_or_load("fractional-jobs", load),
            cache.get_or_load("fractional-jobs", load),
            cache.get_or_load("fractional-jobs", load),
            cache.get_or_load("fractional-jobs", load),
            cache.get_or_load("fractional-jobs", load),
            cache.get_or_load("fractional-jobs", load),
        );

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        for got in [&b, &c, &d, &e, &f, &g, &h] {
            assert!(Arc::ptr_eq(&a, got));
        }
    }

    #[test]
    fn degraded_pages_expire_sooner() {
        let cache = PageCache::new(Duration::from_secs(3600));
        assert_eq!(cache.ttl_for(&page("a", 1, true)), DEGRADED_TTL);
        assert_eq!(
            cache.ttl_for(&page("a", 1, false)),
            Duration::from_secs(3600)
        );
    }
}

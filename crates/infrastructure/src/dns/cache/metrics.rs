use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

#[derive(Default)]
pub struct CacheMetrics {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub insertions: AtomicU64,
    pub expired_removals: AtomicU64,
}

impl CacheMetrics {
    #[inline]
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, AtomicOrdering::Relaxed);
    }

    #[inline]
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, AtomicOrdering::Relaxed);
    }

    #[inline]
    pub fn record_insertion(&self) {
        self.insertions.fetch_add(1, AtomicOrdering::Relaxed);
    }

    #[inline]
    pub fn record_expired(&self, count: usize) {
        if count > 0 {
            self.expired_removals
                .fetch_add(count as u64, AtomicOrdering::Relaxed);
        }
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(AtomicOrdering::Relaxed) as f64;
        let total = hits + self.misses.load(AtomicOrdering::Relaxed) as f64;

        if total > 0.0 {
            (hits / total) * 100.0
        } else {
            0.0
        }
    }
}

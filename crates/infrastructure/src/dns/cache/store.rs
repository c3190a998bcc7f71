use super::key::CacheKey;
use super::metrics::CacheMetrics;
use dashmap::DashMap;
use ferrous_recursor_application::ports::{CacheMetricsSnapshot, RecordCache};
use hickory_proto::rr::{Name, Record, RecordType};
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, trace};

#[derive(Debug, Clone)]
pub struct CachedRecord {
    pub record: Record,
    pub expires_at: Instant,
}

impl CachedRecord {
    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-memory record cache keyed by owner name and type, holding every
/// distinct record observed for that key until its TTL runs out.
pub struct RecordStore {
    entries: DashMap<CacheKey, Vec<CachedRecord>, FxBuildHasher>,
    metrics: CacheMetrics,
}

impl RecordStore {
    pub fn new(shard_amount: usize) -> Self {
        info!(shard_amount, "Initializing record cache");

        Self {
            entries: DashMap::with_hasher_and_shard_amount(FxBuildHasher, shard_amount),
            metrics: CacheMetrics::default(),
        }
    }

    pub fn save_at(&self, record: &Record, now: Instant) {
        let ttl = record.ttl();
        if ttl == 0 {
            trace!(name = %record.name(), record_type = %record.record_type(), "Skipping zero-TTL record");
            return;
        }

        let expires_at = now + Duration::from_secs(u64::from(ttl));
        let key = CacheKey::new(record.name(), record.record_type());

        let mut slot = self.entries.entry(key).or_default();
        if let Some(existing) = slot
            .iter_mut()
            .find(|cached| cached.record.data() == record.data())
        {
            if expires_at > existing.expires_at {
                existing.expires_at = expires_at;
                existing.record = record.clone();
            }
            return;
        }

        slot.push(CachedRecord {
            record: record.clone(),
            expires_at,
        });
        drop(slot);

        self.metrics.record_insertion();
        trace!(name = %record.name(), record_type = %record.record_type(), ttl, "Cached record");
    }

    pub fn lookup_at(&self, name: &Name, record_type: RecordType, now: Instant) -> Option<Record> {
        let key = CacheKey::new(name, record_type);

        let (picked, emptied) = match self.entries.get_mut(&key) {
            Some(mut slot) => {
                let before = slot.len();
                slot.retain(|cached| !cached.is_expired_at(now));
                self.metrics.record_expired(before - slot.len());

                let picked = if slot.is_empty() {
                    None
                } else {
                    Some(slot[fastrand::usize(..slot.len())].record.clone())
                };
                (picked, slot.is_empty())
            }
            None => (None, false),
        };

        if emptied {
            self.entries.remove_if(&key, |_, slot| slot.is_empty());
        }

        match picked {
            Some(record) => {
                self.metrics.record_hit();
                trace!(name = %name, record_type = %record_type, "Cache hit");
                Some(record)
            }
            None => {
                self.metrics.record_miss();
                trace!(name = %name, record_type = %record_type, "Cache miss");
                None
            }
        }
    }

    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut removed = 0;

        self.entries.retain(|_, slot| {
            let before = slot.len();
            slot.retain(|cached| !cached.is_expired_at(now));
            removed += before - slot.len();
            !slot.is_empty()
        });

        self.metrics.record_expired(removed);
        removed
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

impl RecordCache for RecordStore {
    fn save(&self, record: &Record) {
        self.save_at(record, Instant::now());
    }

    fn lookup(&self, name: &Name, record_type: RecordType) -> Option<Record> {
        self.lookup_at(name, record_type, Instant::now())
    }

    fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            total_keys: self.entries.len(),
            hits: self.metrics.hits.load(AtomicOrdering::Relaxed),
            misses: self.metrics.misses.load(AtomicOrdering::Relaxed),
            insertions: self.metrics.insertions.load(AtomicOrdering::Relaxed),
            expired_removals: self.metrics.expired_removals.load(AtomicOrdering::Relaxed),
        }
    }
}

#![allow(dead_code)]

use ferrous_recursor_application::ports::{CacheMetricsSnapshot, RecordCache};
use hickory_proto::rr::{Name, Record, RecordType};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct MockRecordCache {
    purge_calls: AtomicUsize,
    removed_per_purge: usize,
}

impl MockRecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn removing(removed_per_purge: usize) -> Self {
        Self {
            purge_calls: AtomicUsize::new(0),
            removed_per_purge,
        }
    }

    pub fn purge_call_count(&self) -> usize {
        self.purge_calls.load(Ordering::SeqCst)
    }
}

impl RecordCache for MockRecordCache {
    fn save(&self, _record: &Record) {}

    fn lookup(&self, _name: &Name, _record_type: RecordType) -> Option<Record> {
        None
    }

    fn purge_expired(&self) -> usize {
        self.purge_calls.fetch_add(1, Ordering::SeqCst);
        self.removed_per_purge
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot::default()
    }
}

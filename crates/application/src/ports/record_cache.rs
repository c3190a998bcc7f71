use hickory_proto::rr::{Name, Record, RecordType};

/// Snapshot of record cache counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub total_keys: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub expired_removals: u64,
}

/// Port for the TTL-bounded record cache shared by every resolution.
///
/// Implementations must tolerate concurrent `save` and `lookup` calls from
/// many tasks; each call is independently consistent.
pub trait RecordCache: Send + Sync {
    /// Remember `record` until its TTL runs out.
    fn save(&self, record: &Record);

    /// Return one unexpired record for `(name, record_type)`, chosen at
    /// random when several are held. Expired entries are dropped on the way.
    fn lookup(&self, name: &Name, record_type: RecordType) -> Option<Record>;

    /// Drop every expired entry, returning how many were removed.
    fn purge_expired(&self) -> usize;

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot;
}

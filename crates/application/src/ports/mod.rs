mod dns_resolver;
mod record_cache;

pub use dns_resolver::{DnsResolver, Resolution};
pub use record_cache::{CacheMetricsSnapshot, RecordCache};

pub mod key;
pub mod metrics;
pub mod store;

pub use key::CacheKey;
pub use metrics::CacheMetrics;
pub use store::{CachedRecord, RecordStore};

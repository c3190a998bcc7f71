use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Seconds between sweeps that drop expired records. 0 disables the sweep.
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,

    #[serde(default = "default_shard_amount")]
    pub shard_amount: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            purge_interval_secs: default_purge_interval_secs(),
            shard_amount: default_shard_amount(),
        }
    }
}

fn default_purge_interval_secs() -> u64 {
    300
}

fn default_shard_amount() -> usize {
    64
}

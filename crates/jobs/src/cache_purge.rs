use ferrous_recursor_application::ports::RecordCache;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_PURGE_INTERVAL_SECS: u64 = 300;

/// Periodically drops expired records so keys that are never looked up again
/// do not pile up. Lookups already ignore expired entries on their own.
pub struct CachePurgeJob {
    cache: Arc<dyn RecordCache>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CachePurgeJob {
    pub fn new(cache: Arc<dyn RecordCache>) -> Self {
        Self {
            cache,
            interval_secs: DEFAULT_PURGE_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting cache purge job");

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        // The first tick completes immediately; nothing can have expired yet.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("CachePurgeJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let removed = self.cache.purge_expired();
                    let metrics = self.cache.metrics_snapshot();
                    if removed > 0 {
                        info!(
                            removed,
                            keys = metrics.total_keys,
                            "Cache purge cycle completed"
                        );
                    } else {
                        debug!(keys = metrics.total_keys, "Cache purge cycle found nothing to remove");
                    }
                }
            }
        }
    }
}

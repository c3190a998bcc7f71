use crate::CachePurgeJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()>;
}

impl SpawnableJob for CachePurgeJob {
    fn with_cancellation(self, token: CancellationToken) -> Self {
        CachePurgeJob::with_cancellation(self, token)
    }

    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.start().await })
    }
}

fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &Option<CancellationToken>,
) -> Option<tokio::task::JoinHandle<()>> {
    let job = job?;
    let job = match shutdown {
        Some(token) => job.with_cancellation(token.clone()),
        None => job,
    };
    Some(Arc::new(job).start_job())
}

pub struct JobRunner {
    cache_purge: Option<CachePurgeJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            cache_purge: None,
            shutdown: None,
        }
    }

    pub fn with_cache_purge(mut self, job: CachePurgeJob) -> Self {
        self.cache_purge = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) -> Vec<tokio::task::JoinHandle<()>> {
        info!("Starting background job runner");

        let handles: Vec<_> = spawn_job(self.cache_purge, &self.shutdown)
            .into_iter()
            .collect();

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}

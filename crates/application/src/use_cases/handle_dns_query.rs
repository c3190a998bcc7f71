use crate::ports::DnsResolver;
use crate::services::RootServerSelector;
use bytes::Bytes;
use ferrous_recursor_domain::DomainError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Turns one raw client query into the raw bytes of the reply, or nothing.
///
/// Failures are silent towards the client: no SERVFAIL is synthesised, the
/// client simply times out.
pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
    selector: Arc<RootServerSelector>,
    deadline: Duration,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        resolver: Arc<dyn DnsResolver>,
        selector: Arc<RootServerSelector>,
        deadline: Duration,
    ) -> Self {
        Self {
            resolver,
            selector,
            deadline,
        }
    }

    pub async fn execute(&self, query: &[u8]) -> Option<Bytes> {
        let start = Instant::now();
        let start_server = self.selector.pick();

        let outcome = tokio::time::timeout(self.deadline, self.resolver.resolve(query, start_server))
            .await
            .unwrap_or(Err(DomainError::QueryTimeout));

        match outcome {
            Ok(resolution) => {
                debug!(
                    start_server = %start_server,
                    answers = resolution.message.answers().len(),
                    rcode = ?resolution.message.response_code(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Query resolved"
                );
                Some(resolution.bytes)
            }
            Err(e) => {
                debug!(
                    start_server = %start_server,
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Query left unanswered"
                );
                None
            }
        }
    }
}

use async_trait::async_trait;
use ferrous_recursor_application::ports::{DnsResolver, Resolution};
use ferrous_recursor_domain::DomainError;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::Duration;

pub struct MockDnsResolver {
    outcome: Mutex<Result<Resolution, DomainError>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(Vec<u8>, IpAddr)>>,
}

impl MockDnsResolver {
    pub fn answering(resolution: Resolution) -> Self {
        Self {
            outcome: Mutex::new(Ok(resolution)),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            outcome: Mutex::new(Err(error)),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(Vec<u8>, IpAddr)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(
        &self,
        query: &[u8],
        start_server: IpAddr,
    ) -> Result<Resolution, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_vec(), start_server));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.outcome.lock().unwrap().clone()
    }
}

use super::recursive::RecursiveResolver;
use crate::dns::transport::NameServerTransport;
use ferrous_recursor_application::ports::RecordCache;
use ferrous_recursor_application::services::RootServerSelector;
use ferrous_recursor_domain::config::ResolverConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_millis(2500);
const DEFAULT_MAX_HOPS: usize = 16;
const DEFAULT_MAX_QUERIES: usize = 64;

pub struct RecursiveResolverBuilder {
    transport: Arc<dyn NameServerTransport>,
    cache: Arc<dyn RecordCache>,
    selector: Arc<RootServerSelector>,
    dns_timeout: Duration,
    max_hops: usize,
    max_queries: usize,
}

impl RecursiveResolverBuilder {
    pub fn new(
        transport: Arc<dyn NameServerTransport>,
        cache: Arc<dyn RecordCache>,
        selector: Arc<RootServerSelector>,
    ) -> Self {
        Self {
            transport,
            cache,
            selector,
            dns_timeout: DEFAULT_DNS_TIMEOUT,
            max_hops: DEFAULT_MAX_HOPS,
            max_queries: DEFAULT_MAX_QUERIES,
        }
    }

    pub fn with_config(self, config: &ResolverConfig) -> Self {
        self.with_dns_timeout(config.dns_timeout())
            .with_max_hops(config.max_hops)
            .with_max_queries(config.max_queries)
    }

    pub fn with_dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout = timeout;
        self
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub fn with_max_queries(mut self, max_queries: usize) -> Self {
        self.max_queries = max_queries;
        self
    }

    pub fn build(self) -> RecursiveResolver {
        info!(
            dns_timeout_ms = self.dns_timeout.as_millis() as u64,
            max_hops = self.max_hops,
            max_queries = self.max_queries,
            roots = self.selector.candidates().len(),
            "Building recursive resolver"
        );

        RecursiveResolver {
            transport: self.transport,
            cache: self.cache,
            selector: self.selector,
            dns_timeout: self.dns_timeout,
            max_hops: self.max_hops,
            max_queries: self.max_queries,
        }
    }
}

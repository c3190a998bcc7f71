use ferrous_recursor_application::ports::RecordCache;
use ferrous_recursor_application::services::RootServerSelector;
use ferrous_recursor_application::use_cases::HandleDnsQueryUseCase;
use ferrous_recursor_domain::Config;
use ferrous_recursor_infrastructure::dns::transport::NameServerTransport;
use ferrous_recursor_infrastructure::dns::{RecordStore, RecursiveResolverBuilder};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub cache: Arc<dyn RecordCache>,
    pub handler_use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServices {
    pub fn new(
        config: &Config,
        transport: Arc<dyn NameServerTransport>,
        selector: Arc<RootServerSelector>,
    ) -> Self {
        info!("Initializing DNS services");

        let cache: Arc<dyn RecordCache> = Arc::new(RecordStore::new(config.cache.shard_amount));

        let resolver = RecursiveResolverBuilder::new(transport, cache.clone(), selector.clone())
            .with_config(&config.resolver)
            .build();

        let handler_use_case = Arc::new(HandleDnsQueryUseCase::new(
            Arc::new(resolver),
            selector,
            config.resolver.resolution_deadline(),
        ));

        info!("DNS services initialized");

        Self {
            cache,
            handler_use_case,
        }
    }
}

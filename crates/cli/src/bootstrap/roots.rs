use ferrous_recursor_application::services::RootServerSelector;
use ferrous_recursor_domain::Config;
use ferrous_recursor_infrastructure::dns::transport::NameServerTransport;
use ferrous_recursor_infrastructure::dns::RootProbe;
use std::sync::Arc;
use tracing::info;

/// Probe every configured root and rank the ones that answered over UDP.
/// Fails when none did, since no resolution could ever start.
pub async fn probe_root_servers(
    config: &Config,
    transport: Arc<dyn NameServerTransport>,
) -> anyhow::Result<Arc<RootServerSelector>> {
    let hints = config.root_hints()?;
    let probe = RootProbe::new(transport, config.resolver.test_timeout());

    let candidates = probe.measure_all(&hints).await;
    let selector = RootServerSelector::new(&candidates)?;

    info!(
        configured = hints.len(),
        reachable = selector.candidates().len(),
        fastest = %selector.candidates()[0].hostname,
        "Root servers ranked"
    );

    Ok(Arc::new(selector))
}

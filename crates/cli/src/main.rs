use clap::Parser;
use ferrous_recursor_domain::CliOverrides;
use ferrous_recursor_infrastructure::dns::transport::{NameServerTransport, NetworkTransport};
use ferrous_recursor_jobs::{CachePurgeJob, JobRunner};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-recursor")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous Recursor - Recursive DNS resolver walking the delegation tree from the roots")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Address to listen on
    #[arg(long, value_name = "IP")]
    ip: Option<String>,

    /// Port to listen on (UDP and TCP)
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Root server as hostname:ip; repeat to list several. Replaces the configured roots.
    #[arg(long = "dns-root", value_name = "HOST:IP")]
    dns_roots: Vec<String>,

    /// Timeout of each root probe exchange, in milliseconds
    #[arg(long, value_name = "MS")]
    test_timeout: Option<u64>,

    /// Timeout of each name server exchange while resolving, in milliseconds
    #[arg(long, value_name = "MS")]
    dns_timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        bind_address: cli.ip.clone(),
        dns_port: cli.port,
        root_servers: cli.dns_roots.clone(),
        test_timeout_ms: cli.test_timeout,
        dns_timeout_ms: cli.dns_timeout,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous Recursor v{}", env!("CARGO_PKG_VERSION"));

    let transport: Arc<dyn NameServerTransport> = Arc::new(NetworkTransport::new());
    let selector = bootstrap::probe_root_servers(&config, transport.clone()).await?;

    let dns_services = di::DnsServices::new(&config, transport, selector);

    let shutdown = CancellationToken::new();
    JobRunner::new()
        .with_cache_purge(
            CachePurgeJob::new(dns_services.cache.clone())
                .with_interval(config.cache.purge_interval_secs),
        )
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let bind_ip: IpAddr = config.server.bind_address.parse()?;
    let dns_addr = SocketAddr::new(bind_ip, config.server.dns_port);

    tokio::select! {
        result = server::start_dns_server(dns_addr, dns_services.handler_use_case.clone()) => {
            if let Err(e) = &result {
                error!(error = %e, "DNS server error");
            }
            shutdown.cancel();
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            shutdown.cancel();
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

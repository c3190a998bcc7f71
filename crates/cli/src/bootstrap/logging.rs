use ferrous_recursor_domain::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn init_logging(config: &Config) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(rust_log.as_deref(), &config.logging.level);

    tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_env_filter(filter)
        .with_ansi(true)
        .init();

    info!("Logging initialized at level: {}", config.logging.level);
}

/// `RUST_LOG` directives win over the configured level when they parse.
fn log_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

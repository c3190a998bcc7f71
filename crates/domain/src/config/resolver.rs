use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Root hints as `hostname:ip` pairs.
    #[serde(default = "default_root_servers")]
    pub root_servers: Vec<String>,

    /// Timeout for each latency probe exchange at startup.
    #[serde(default = "default_timeout_ms")]
    pub test_timeout_ms: u64,

    /// Timeout for a single query attempt against one server.
    #[serde(default = "default_timeout_ms")]
    pub dns_timeout_ms: u64,

    /// Maximum depth of nested resolutions (CNAME chasing and glue lookups).
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,

    /// Maximum number of servers a single walk may query.
    #[serde(default = "default_max_queries")]
    pub max_queries: usize,

    /// Overall deadline for answering one client query.
    #[serde(default = "default_resolution_deadline_ms")]
    pub resolution_deadline_ms: u64,
}

impl ResolverConfig {
    pub fn test_timeout(&self) -> Duration {
        Duration::from_millis(self.test_timeout_ms)
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }

    pub fn resolution_deadline(&self) -> Duration {
        Duration::from_millis(self.resolution_deadline_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_servers: default_root_servers(),
            test_timeout_ms: default_timeout_ms(),
            dns_timeout_ms: default_timeout_ms(),
            max_hops: default_max_hops(),
            max_queries: default_max_queries(),
            resolution_deadline_ms: default_resolution_deadline_ms(),
        }
    }
}

fn default_root_servers() -> Vec<String> {
    [
        "a.root-servers.net:198.41.0.4",
        "b.root-servers.net:170.247.170.2",
        "c.root-servers.net:192.33.4.12",
        "d.root-servers.net:199.7.91.13",
        "e.root-servers.net:192.203.230.10",
        "f.root-servers.net:192.5.5.241",
        "g.root-servers.net:192.112.36.4",
        "h.root-servers.net:198.97.190.53",
        "i.root-servers.net:192.36.148.17",
        "j.root-servers.net:192.58.128.30",
        "k.root-servers.net:193.0.14.129",
        "l.root-servers.net:199.7.83.42",
        "m.root-servers.net:202.12.27.33",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_timeout_ms() -> u64 {
    2500
}

fn default_max_hops() -> usize {
    16
}

fn default_max_queries() -> usize {
    64
}

fn default_resolution_deadline_ms() -> u64 {
    30_000
}

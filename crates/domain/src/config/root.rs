use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use super::server::ServerConfig;
use crate::root_server::RootHint;

/// Main configuration structure for Ferrous Recursor
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening address and port
    #[serde(default)]
    pub server: ServerConfig,

    /// Root hints, timeouts and recursion guards
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-recursor.toml in current directory
    /// 3. /etc/ferrous-recursor/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("ferrous-recursor.toml").exists() {
            Self::from_file("ferrous-recursor.toml")?
        } else if std::path::Path::new("/etc/ferrous-recursor/config.toml").exists() {
            Self::from_file("/etc/ferrous-recursor/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(ip) = overrides.bind_address {
            self.server.bind_address = ip;
        }
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if !overrides.root_servers.is_empty() {
            self.resolver.root_servers = overrides.root_servers;
        }
        if let Some(timeout) = overrides.test_timeout_ms {
            self.resolver.test_timeout_ms = timeout;
        }
        if let Some(timeout) = overrides.dns_timeout_ms {
            self.resolver.dns_timeout_ms = timeout;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Parse the configured root hints.
    pub fn root_hints(&self) -> Result<Vec<RootHint>, ConfigError> {
        self.resolver
            .root_servers
            .iter()
            .map(|raw| {
                raw.parse::<RootHint>()
                    .map_err(|e| ConfigError::Validation(e.to_string()))
            })
            .collect()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.bind_address.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid bind address: {}",
                self.server.bind_address
            )));
        }

        if self.resolver.root_servers.is_empty() {
            return Err(ConfigError::Validation(
                "No root servers; cannot bootstrap DNS process".to_string(),
            ));
        }
        self.root_hints()?;

        if self.resolver.test_timeout_ms == 0 || self.resolver.dns_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Timeouts must be greater than 0".to_string(),
            ));
        }

        if self.resolver.max_hops == 0 || self.resolver.max_queries == 0 {
            return Err(ConfigError::Validation(
                "max_hops and max_queries must be greater than 0".to_string(),
            ));
        }

        let shards = self.cache.shard_amount;
        if shards < 2 || !shards.is_power_of_two() {
            return Err(ConfigError::Validation(format!(
                "cache.shard_amount must be a power of two greater than 1, got {}",
                shards
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub dns_port: Option<u16>,
    pub root_servers: Vec<String>,
    pub test_timeout_ms: Option<u64>,
    pub dns_timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}

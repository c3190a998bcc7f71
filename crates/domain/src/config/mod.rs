//! Configuration module for Ferrous Recursor
//!
//! - `root`: Main configuration and CLI overrides
//! - `server`: Listening address and port
//! - `resolver`: Root hints, timeouts and recursion guards
//! - `cache`: Record cache maintenance
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod server;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;

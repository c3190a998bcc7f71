//! Ferrous Recursor Domain Layer
pub mod config;
pub mod errors;
pub mod root_server;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use root_server::{RootHint, ServerCandidate};

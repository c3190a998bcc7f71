use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS query: {0}")]
    InvalidQuery(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Protocol mismatch from {server}: {reason}")]
    ProtocolMismatch { server: String, reason: String },

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport failure talking to {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("Resolution exhausted for {domain}")]
    ResolutionExhausted { domain: String },

    #[error("Recursion limit of {limit} nested resolutions exceeded")]
    HopLimitExceeded { limit: usize },

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Invalid root server: {0}")]
    InvalidRootServer(String),

    #[error("No root server answered the startup probe over UDP")]
    NoReachableRootServers,
}

impl DomainError {
    /// Failures that only disqualify the server that produced them.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::TransportTimeout { .. }
                | Self::TransportIo { .. }
                | Self::ProtocolMismatch { .. }
                | Self::InvalidDnsResponse(_)
        )
    }
}

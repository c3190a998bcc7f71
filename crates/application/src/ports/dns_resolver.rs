use async_trait::async_trait;
use bytes::Bytes;
use ferrous_recursor_domain::DomainError;
use hickory_proto::op::Message;
use std::net::IpAddr;

/// A final answer: the decoded message and the exact bytes to hand back to
/// the client.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub message: Message,
    pub bytes: Bytes,
}

impl Resolution {
    pub fn new(message: Message, bytes: impl Into<Bytes>) -> Self {
        Self {
            message,
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolve a raw client query by walking the delegation tree from
    /// `start_server`. Any error means the client gets no answer.
    async fn resolve(&self, query: &[u8], start_server: IpAddr)
        -> Result<Resolution, DomainError>;
}

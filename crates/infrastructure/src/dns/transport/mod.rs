pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use bytes::Bytes;
use ferrous_recursor_domain::DomainError;
use hickory_proto::op::{Message, MessageType};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const DNS_PORT: u16 = 53;

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub message: Message,

    pub bytes: Bytes,

    pub protocol_used: &'static str,
}

/// One query to one name server. Every call opens and drops its own socket.
#[async_trait]
pub trait NameServerTransport: Send + Sync {
    async fn send_udp(
        &self,
        query: &[u8],
        server: IpAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    async fn send_tcp(
        &self,
        query: &[u8],
        server: IpAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;
}

/// Plain DNS over the network, UDP or TCP.
#[derive(Debug, Clone, Copy)]
pub struct NetworkTransport {
    port: u16,
}

impl NetworkTransport {
    pub fn new() -> Self {
        Self { port: DNS_PORT }
    }

    pub fn with_port(port: u16) -> Self {
        Self { port }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn server_addr(&self, server: IpAddr) -> SocketAddr {
        SocketAddr::new(server, self.port)
    }
}

impl Default for NetworkTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NameServerTransport for NetworkTransport {
    async fn send_udp(
        &self,
        query: &[u8],
        server: IpAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server_addr = self.server_addr(server);
        let bytes = udp::exchange(query, server_addr, timeout).await?;
        let message = validate_response(query, &bytes, &server_addr)?;

        Ok(TransportResponse {
            message,
            bytes: Bytes::from(bytes),
            protocol_used: "UDP",
        })
    }

    async fn send_tcp(
        &self,
        query: &[u8],
        server: IpAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server_addr = self.server_addr(server);
        let bytes = tcp::exchange(query, server_addr, timeout).await?;
        let message = validate_response(query, &bytes, &server_addr)?;

        Ok(TransportResponse {
            message,
            bytes: Bytes::from(bytes),
            protocol_used: "TCP",
        })
    }
}

/// Decode `response` and check it actually answers `query`: same ID, reply
/// bit set.
pub fn validate_response(
    query: &[u8],
    response: &[u8],
    server: &SocketAddr,
) -> Result<Message, DomainError> {
    let message = Message::from_vec(response).map_err(|e| {
        DomainError::InvalidDnsResponse(format!("Failed to parse response from {}: {}", server, e))
    })?;

    let query_id = query_id(query).ok_or_else(|| {
        DomainError::InvalidQuery("Query shorter than a DNS header".to_string())
    })?;

    if message.id() != query_id {
        return Err(DomainError::ProtocolMismatch {
            server: server.to_string(),
            reason: format!(
                "response ID {:#06x} does not match query ID {:#06x}",
                message.id(),
                query_id
            ),
        });
    }

    if message.message_type() != MessageType::Response {
        return Err(DomainError::ProtocolMismatch {
            server: server.to_string(),
            reason: "reply flag not set".to_string(),
        });
    }

    Ok(message)
}

fn query_id(query: &[u8]) -> Option<u16> {
    match query {
        [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
        _ => None,
    }
}

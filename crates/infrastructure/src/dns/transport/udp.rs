//! UDP exchange (RFC 1035 §4.2.1)
//!
//! One datagram out, one datagram back. Datagrams from any other address are
//! dropped while waiting. A truncated reply is returned as is; the resolver
//! decides whether to retry over TCP.

use ferrous_recursor_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub(crate) async fn exchange(
    query: &[u8],
    server_addr: SocketAddr,
    timeout: Duration,
) -> Result<Vec<u8>, DomainError> {
    let bind_addr: SocketAddr = if server_addr.is_ipv4() {
        SocketAddr::from(([0, 0, 0, 0], 0))
    } else {
        SocketAddr::from(([0u16; 8], 0))
    };

    let socket = UdpSocket::bind(bind_addr)
        .await
        .map_err(|e| io_error(server_addr, "bind", e))?;

    let deadline = Instant::now() + timeout;

    let bytes_sent = tokio::time::timeout_at(deadline, socket.send_to(query, server_addr))
        .await
        .map_err(|_| timeout_error(server_addr))?
        .map_err(|e| io_error(server_addr, "send", e))?;

    debug!(server = %server_addr, bytes_sent, "UDP query sent");

    let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

    let bytes_received = loop {
        let (bytes_received, from_addr) = tokio::time::timeout_at(deadline, socket.recv_from(&mut recv_buf))
            .await
            .map_err(|_| timeout_error(server_addr))?
            .map_err(|e| io_error(server_addr, "receive", e))?;

        if from_addr == server_addr {
            break bytes_received;
        }

        warn!(
            expected = %server_addr,
            received_from = %from_addr,
            "Dropping UDP datagram from unexpected source"
        );
    };

    recv_buf.truncate(bytes_received);

    debug!(server = %server_addr, bytes_received, "UDP response received");

    Ok(recv_buf)
}

fn timeout_error(server_addr: SocketAddr) -> DomainError {
    DomainError::TransportTimeout {
        server: server_addr.to_string(),
    }
}

fn io_error(server_addr: SocketAddr, op: &str, e: std::io::Error) -> DomainError {
    DomainError::TransportIo {
        server: server_addr.to_string(),
        reason: format!("UDP {} failed: {}", op, e),
    }
}

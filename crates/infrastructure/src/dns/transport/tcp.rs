//! TCP exchange (RFC 1035 §4.2.2)
//!
//! Messages carry a two-byte big-endian length prefix. One query per
//! connection; the stream is closed when it goes out of scope.

use ferrous_recursor_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub(crate) async fn exchange(
    query: &[u8],
    server_addr: SocketAddr,
    timeout: Duration,
) -> Result<Vec<u8>, DomainError> {
    let mut stream = tokio::time::timeout(timeout, TcpStream::connect(server_addr))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server_addr.to_string(),
        })?
        .map_err(|e| io_error(server_addr, "connect", e))?;

    stream
        .set_nodelay(true)
        .map_err(|e| io_error(server_addr, "set TCP_NODELAY", e))?;

    tokio::time::timeout(timeout, send_with_length_prefix(&mut stream, query))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server_addr.to_string(),
        })?
        .map_err(|e| io_error(server_addr, "send", e))?;

    debug!(server = %server_addr, message_len = query.len(), "TCP query sent");

    let response = tokio::time::timeout(timeout, read_with_length_prefix(&mut stream))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server_addr.to_string(),
        })?
        .map_err(|e| io_error(server_addr, "receive", e))?;

    debug!(server = %server_addr, response_len = response.len(), "TCP response received");

    Ok(response)
}

fn io_error(server_addr: SocketAddr, op: &str, e: io::Error) -> DomainError {
    DomainError::TransportIo {
        server: server_addr.to_string(),
        reason: format!("TCP {} failed: {}", op, e),
    }
}

pub async fn send_with_length_prefix<S>(stream: &mut S, message: &[u8]) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("message of {} bytes does not fit a length prefix", message.len()),
        )
    })?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message).await?;
    stream.flush().await
}

pub async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let mut message = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut message).await?;

    Ok(message)
}

//! Startup latency probe for the configured root servers.

use super::forwarding::MessageBuilder;
use super::transport::NameServerTransport;
use ferrous_recursor_domain::{RootHint, ServerCandidate};
use futures::future::join_all;
use hickory_proto::rr::RecordType;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeProtocol {
    Tcp,
    Udp,
}

impl ProbeProtocol {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
        }
    }
}

/// Measures how long each root server takes to answer a PTR query for its
/// own name, over TCP and over UDP.
pub struct RootProbe {
    transport: Arc<dyn NameServerTransport>,
    timeout: Duration,
}

impl RootProbe {
    pub fn new(transport: Arc<dyn NameServerTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Probe every hint concurrently. The result keeps the order of `hints`.
    pub async fn measure_all(&self, hints: &[RootHint]) -> Vec<ServerCandidate> {
        info!(roots = hints.len(), timeout_ms = self.timeout.as_millis() as u64, "Probing root servers");
        join_all(hints.iter().map(|hint| self.measure(hint))).await
    }

    pub async fn measure(&self, hint: &RootHint) -> ServerCandidate {
        let query = MessageBuilder::build_query(&format!("{}.", hint.hostname), RecordType::PTR, true);

        let (tcp, udp) = match query {
            Ok((_, bytes)) => (
                self.time(hint, &bytes, ProbeProtocol::Tcp).await,
                self.time(hint, &bytes, ProbeProtocol::Udp).await,
            ),
            Err(e) => {
                warn!(root = %hint, error = %e, "Cannot build probe query");
                (None, None)
            }
        };

        info!(
            root = %hint,
            tcp_ms = tcp.map(|d| d.as_millis() as u64),
            udp_ms = udp.map(|d| d.as_millis() as u64),
            "Root server probed"
        );

        ServerCandidate::new(hint, tcp, udp)
    }

    async fn time(&self, hint: &RootHint, query: &[u8], protocol: ProbeProtocol) -> Option<Duration> {
        let start = Instant::now();

        let result = match protocol {
            ProbeProtocol::Tcp => self.transport.send_tcp(query, hint.address, self.timeout).await,
            ProbeProtocol::Udp => self.transport.send_udp(query, hint.address, self.timeout).await,
        };

        match result {
            Ok(_) => Some(start.elapsed()),
            Err(e) => {
                warn!(root = %hint, protocol = protocol.as_str(), error = %e, "Root probe failed");
                None
            }
        }
    }
}

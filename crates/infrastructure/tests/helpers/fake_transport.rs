use async_trait::async_trait;
use bytes::Bytes;
use ferrous_recursor_domain::DomainError;
use ferrous_recursor_infrastructure::dns::forwarding::MessageBuilder;
use ferrous_recursor_infrastructure::dns::transport::{
    validate_response, NameServerTransport, TransportResponse, DNS_PORT,
};
use hickory_proto::op::Message;
use hickory_proto::rr::RecordType;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = Arc<dyn Fn(&Message) -> Option<Message> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportCall {
    pub server: IpAddr,
    pub protocol: &'static str,
    pub qname: String,
    pub qtype: RecordType,
    pub id: u16,
}

/// Scripted name servers keyed by address. A responder returning `None`, or
/// a server with no responder, behaves like a timeout. Replies go through the
/// same ID and reply-flag checks as the network transport.
#[derive(Default)]
pub struct FakeTransport {
    udp: Mutex<HashMap<IpAddr, Responder>>,
    tcp: Mutex<HashMap<IpAddr, Responder>>,
    calls: Mutex<Vec<TransportCall>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_udp<F>(self, server: IpAddr, responder: F) -> Self
    where
        F: Fn(&Message) -> Option<Message> + Send + Sync + 'static,
    {
        self.udp.lock().unwrap().insert(server, Arc::new(responder));
        self
    }

    pub fn on_tcp<F>(self, server: IpAddr, responder: F) -> Self
    where
        F: Fn(&Message) -> Option<Message> + Send + Sync + 'static,
    {
        self.tcp.lock().unwrap().insert(server, Arc::new(responder));
        self
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn servers_asked(&self) -> Vec<IpAddr> {
        self.calls().into_iter().map(|c| c.server).collect()
    }

    fn respond(
        &self,
        responders: &Mutex<HashMap<IpAddr, Responder>>,
        protocol: &'static str,
        query: &[u8],
        server: IpAddr,
    ) -> Result<TransportResponse, DomainError> {
        let parsed = Message::from_vec(query)
            .map_err(|e| DomainError::InvalidQuery(e.to_string()))?;

        self.calls.lock().unwrap().push(TransportCall {
            server,
            protocol,
            qname: parsed.queries()[0].name().to_utf8(),
            qtype: parsed.queries()[0].query_type(),
            id: parsed.id(),
        });

        let responder = responders.lock().unwrap().get(&server).cloned();
        let message = responder
            .and_then(|r| r(&parsed))
            .ok_or_else(|| DomainError::TransportTimeout {
                server: server.to_string(),
            })?;

        let bytes = MessageBuilder::serialize_message(&message)?;
        let message = validate_response(query, &bytes, &SocketAddr::new(server, DNS_PORT))?;

        Ok(TransportResponse {
            message,
            bytes: Bytes::from(bytes),
            protocol_used: protocol,
        })
    }
}

#[async_trait]
impl NameServerTransport for FakeTransport {
    async fn send_udp(
        &self,
        query: &[u8],
        server: IpAddr,
        _timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        self.respond(&self.udp, "UDP", query, server)
    }

    async fn send_tcp(
        &self,
        query: &[u8],
        server: IpAddr,
        _timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        self.respond(&self.tcp, "TCP", query, server)
    }
}

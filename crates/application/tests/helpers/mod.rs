#![allow(dead_code)]

mod mock_resolver;

pub use mock_resolver::MockDnsResolver;

use ferrous_recursor_domain::{RootHint, ServerCandidate};
use hickory_proto::op::{Message, MessageType, OpCode};
use std::time::Duration;

pub fn candidate(name: &str, ip: &str, udp_ms: Option<u64>) -> ServerCandidate {
    let hint: RootHint = format!("{}:{}", name, ip).parse().unwrap();
    ServerCandidate::new(&hint, Some(Duration::from_millis(20)), udp_ms.map(Duration::from_millis))
}

pub fn reply(id: u16) -> Message {
    Message::new(id, MessageType::Response, OpCode::Query)
}

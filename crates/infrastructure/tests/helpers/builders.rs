use ferrous_recursor_application::services::RootServerSelector;
use ferrous_recursor_domain::{RootHint, ServerCandidate};
use ferrous_recursor_infrastructure::dns::forwarding::MessageBuilder;
use hickory_proto::op::{Header, Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, CNAME, NS};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

pub fn a_record(owner: &str, address: &str, ttl: u32) -> Record {
    let v4: Ipv4Addr = address.parse().unwrap();
    Record::from_rdata(name(owner), ttl, RData::A(A(v4)))
}

pub fn ns_record(zone: &str, target: &str) -> Record {
    Record::from_rdata(name(zone), 3600, RData::NS(NS(name(target))))
}

pub fn cname_record(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::CNAME(CNAME(name(target))))
}

/// A client-style query (recursion desired) with a fixed ID.
pub fn client_query(owner: &str, record_type: RecordType, id: u16) -> (Message, Vec<u8>) {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(name(owner), record_type));
    let bytes = MessageBuilder::serialize_message(&message).unwrap();
    (message, bytes)
}

/// Start a reply to `query`: same ID and question, reply bit set.
pub fn reply_to(query: &Message) -> Message {
    let mut reply = Message::new(query.id(), MessageType::Response, OpCode::Query);
    reply.set_recursion_desired(query.recursion_desired());
    reply.add_queries(query.queries().iter().cloned());
    reply
}

pub fn answer(query: &Message, answers: Vec<Record>) -> Message {
    let mut reply = reply_to(query);
    reply.add_answers(answers);
    reply
}

pub fn referral(query: &Message, ns: Vec<Record>, glue: Vec<Record>) -> Message {
    let mut reply = reply_to(query);
    reply.add_name_servers(ns);
    reply.add_additionals(glue);
    reply
}

/// Rewrite header fields that `Message` has no public setter for.
pub fn with_header(mut message: Message, edit: impl FnOnce(&mut Header)) -> Message {
    let mut header = *message.header();
    edit(&mut header);
    message.set_header(header);
    message
}

pub fn truncated(query: &Message) -> Message {
    let mut reply = reply_to(query);
    reply.set_truncated(true);
    reply
}

pub fn qname(query: &Message) -> String {
    query.queries()[0].name().to_utf8()
}

pub fn qtype(query: &Message) -> RecordType {
    query.queries()[0].query_type()
}

pub fn candidate(host: &str, address: &str, udp_ms: Option<u64>) -> ServerCandidate {
    let hint: RootHint = format!("{}:{}", host, address).parse().unwrap();
    ServerCandidate::new(&hint, Some(Duration::from_millis(30)), udp_ms.map(Duration::from_millis))
}

/// Selector whose only reachable root is `address`.
pub fn single_root(address: &str) -> Arc<RootServerSelector> {
    Arc::new(
        RootServerSelector::new(&[
            candidate("reachable.root", address, Some(10)),
            candidate("unreachable.root", "192.0.2.250", None),
        ])
        .unwrap(),
    )
}

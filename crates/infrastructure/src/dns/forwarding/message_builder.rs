//! DNS Message Builder
//!
//! Constructs the iterative queries the resolver sends on its own behalf
//! (glue lookups, CNAME targets, root probes) using `hickory-proto`.

use ferrous_recursor_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a non-recursive query for `domain` and serialize it.
    ///
    /// Creates a query with:
    /// - Random ID for request/response matching
    /// - RD (Recursion Desired) flag cleared
    /// - CD (Checking Disabled) set when `checking_disabled` is true
    /// - Single IN-class question
    pub fn build_query(
        domain: &str,
        record_type: RecordType,
        checking_disabled: bool,
    ) -> Result<(Message, Vec<u8>), DomainError> {
        let name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;

        Self::build_query_for_name(name, record_type, checking_disabled)
    }

    pub fn build_query_for_name(
        name: Name,
        record_type: RecordType,
        checking_disabled: bool,
    ) -> Result<(Message, Vec<u8>), DomainError> {
        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(record_type);
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
        message.set_recursion_desired(false);
        message.set_checking_disabled(checking_disabled);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok((message, bytes))
    }

    /// Serialize a Message to wire format bytes
    pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}

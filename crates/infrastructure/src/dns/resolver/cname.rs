//! CNAME chasing helpers.
//!
//! A terminal response whose first answer is a CNAME is followed by resolving
//! the alias target; the nested answer is then re-addressed to the client's
//! original question.

use hickory_proto::op::{Message, MessageType};
use hickory_proto::rr::{Name, RData, Record, RecordType};

/// The alias target to chase, if the response should be followed at all.
///
/// Only the first answer is considered, and a client that explicitly asked
/// for the CNAME of that owner gets the record as is.
pub fn chase_target<'a>(original: &Message, response: &'a Message) -> Option<(&'a Record, Name)> {
    let first = response.answers().first()?;

    let target = match first.data() {
        RData::CNAME(cname) => cname.0.clone(),
        _ => return None,
    };

    let asked_for_cname = original
        .queries()
        .iter()
        .any(|q| q.query_type() == RecordType::CNAME && q.name() == first.name());

    if asked_for_cname {
        return None;
    }

    Some((first, target))
}

/// Build the reply to `original` from the chased alias and the nested answer
/// for its target.
pub fn rewrap(original: &Message, cname: &Record, nested: &Message) -> Message {
    let mut message = Message::new(original.id(), MessageType::Response, nested.op_code());
    message.set_recursion_desired(original.recursion_desired());
    message.set_authoritative(nested.authoritative());
    message.set_authentic_data(nested.authentic_data());
    message.set_recursion_available(nested.recursion_available());
    message.set_response_code(nested.response_code());

    message.add_queries(original.queries().iter().cloned());
    message.add_answer(cname.clone());
    message.add_answers(nested.answers().iter().cloned());
    message.add_name_servers(nested.name_servers().iter().cloned());
    message.add_additionals(nested.additionals().iter().cloned());

    message
}

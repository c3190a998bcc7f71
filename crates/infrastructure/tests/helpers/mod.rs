#![allow(dead_code)]

mod builders;
mod dns_server_mock;
mod fake_transport;

pub use builders::*;
pub use dns_server_mock::MockDnsServer;
pub use fake_transport::{FakeTransport, TransportCall};

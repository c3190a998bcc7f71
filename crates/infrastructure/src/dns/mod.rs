pub mod cache;
pub mod forwarding;
pub mod probe;
pub mod resolver;
pub mod transport;

pub use cache::{CacheKey, RecordStore};
pub use forwarding::MessageBuilder;
pub use probe::RootProbe;
pub use resolver::{RecursiveResolver, RecursiveResolverBuilder};
pub use transport::{NameServerTransport, NetworkTransport, TransportResponse};

use super::cname;
use crate::dns::forwarding::MessageBuilder;
use crate::dns::transport::{NameServerTransport, TransportResponse};
use async_trait::async_trait;
use ferrous_recursor_application::ports::{DnsResolver, RecordCache, Resolution};
use ferrous_recursor_application::services::RootServerSelector;
use ferrous_recursor_domain::DomainError;
use futures::future::{BoxFuture, FutureExt};
use hickory_proto::op::Message;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Iterative resolver that walks the delegation tree itself, starting from a
/// root server, instead of forwarding to an upstream.
pub struct RecursiveResolver {
    pub(super) transport: Arc<dyn NameServerTransport>,
    pub(super) cache: Arc<dyn RecordCache>,
    pub(super) selector: Arc<RootServerSelector>,
    pub(super) dns_timeout: Duration,
    pub(super) max_hops: usize,
    pub(super) max_queries: usize,
}

impl RecursiveResolver {
    /// One walk down the delegation tree for `query`, starting at `start`.
    ///
    /// Servers still to try form a LIFO stack, so the most recently learned
    /// name server is asked first. `depth` counts the nested walks (glue and
    /// CNAME targets) above this one.
    fn walk<'a>(
        &'a self,
        query: Message,
        query_bytes: Vec<u8>,
        start: IpAddr,
        depth: usize,
    ) -> BoxFuture<'a, Result<Resolution, DomainError>> {
        async move {
            if depth > self.max_hops {
                debug!(depth, limit = self.max_hops, "Nested resolution limit reached");
                return Err(DomainError::HopLimitExceeded {
                    limit: self.max_hops,
                });
            }

            let domain = question_name(&query);
            let mut pending = vec![start];
            let mut attempts = 0usize;

            while let Some(server) = pending.pop() {
                if attempts == self.max_queries {
                    debug!(domain = %domain, attempts, "Query budget spent");
                    break;
                }
                attempts += 1;

                debug!(domain = %domain, server = %server, depth, "Asking name server");

                let response = match self.exchange(&query_bytes, server).await {
                    Ok(response) => response,
                    Err(e) if e.is_transport_error() => {
                        debug!(domain = %domain, server = %server, error = %e, "Name server attempt failed");
                        continue;
                    }
                    Err(e) => {
                        warn!(domain = %domain, server = %server, error = %e, "Unexpected failure asking name server");
                        continue;
                    }
                };

                debug!(
                    domain = %domain,
                    server = %server,
                    protocol = response.protocol_used,
                    answers = response.message.answers().len(),
                    "Name server replied"
                );

                self.remember(&response.message);

                let message = &response.message;
                if !message.answers().is_empty() || message.authoritative() {
                    return self.finish(&query, response, start, depth).await;
                }

                for ns in referral_targets(message) {
                    if let Some(address) = self.name_server_address(&ns, depth).await {
                        trace!(domain = %domain, ns = %ns, address = %address, "Queued delegated server");
                        pending.push(address);
                    }
                }
            }

            Err(DomainError::ResolutionExhausted { domain })
        }
        .boxed()
    }

    /// UDP first; a truncated reply is retried over TCP against the same
    /// server and only the TCP reply is used.
    async fn exchange(&self, query: &[u8], server: IpAddr) -> Result<TransportResponse, DomainError> {
        let response = self
            .transport
            .send_udp(query, server, self.dns_timeout)
            .await?;

        if !response.message.truncated() {
            return Ok(response);
        }

        debug!(server = %server, "Truncated UDP response, retrying over TCP");
        self.transport
            .send_tcp(query, server, self.dns_timeout)
            .await
    }

    fn remember(&self, message: &Message) {
        message
            .answers()
            .iter()
            .chain(message.name_servers())
            .chain(message.additionals())
            .for_each(|record| self.cache.save(record));
    }

    async fn finish(
        &self,
        query: &Message,
        response: TransportResponse,
        start: IpAddr,
        depth: usize,
    ) -> Result<Resolution, DomainError> {
        let chase = cname::chase_target(query, &response.message)
            .map(|(alias, target)| (alias.clone(), target));
        let Some((alias, target)) = chase else {
            return Ok(Resolution::new(response.message, response.bytes));
        };

        debug!(alias = %alias.name(), target = %target, "Following CNAME");

        let (nested_query, nested_bytes) =
            MessageBuilder::build_query_for_name(target, RecordType::A, false)?;
        let nested = self
            .walk(nested_query, nested_bytes, start, depth + 1)
            .await?;

        let reply = cname::rewrap(query, &alias, &nested.message);
        let bytes = MessageBuilder::serialize_message(&reply)?;

        Ok(Resolution::new(reply, bytes))
    }

    /// Address of a delegated name server: the cache first, otherwise a
    /// nested lookup from a freshly picked root.
    ///
    /// Any failure, the nesting limit included, only skips this name server;
    /// its siblings in the same referral are still tried.
    async fn name_server_address(&self, ns: &Name, depth: usize) -> Option<IpAddr> {
        if let Some(address) = self.cached_address(ns) {
            return Some(address);
        }

        let resolution = match MessageBuilder::build_query_for_name(ns.clone(), RecordType::A, false) {
            Ok((glue_query, glue_bytes)) => {
                let root = self.selector.pick();
                self.walk(glue_query, glue_bytes, root, depth + 1).await
            }
            Err(e) => Err(e),
        };

        match resolution {
            Ok(resolution) => self
                .cached_address(ns)
                .or_else(|| first_address(resolution.message.answers())),
            Err(e) => {
                debug!(ns = %ns, error = %e, "Could not resolve name server address, skipping");
                None
            }
        }
    }

    fn cached_address(&self, name: &Name) -> Option<IpAddr> {
        self.cache
            .lookup(name, RecordType::A)
            .and_then(|record| address_of(&record))
    }
}

#[async_trait]
impl DnsResolver for RecursiveResolver {
    async fn resolve(&self, query: &[u8], start_server: IpAddr) -> Result<Resolution, DomainError> {
        let parsed = Message::from_vec(query)
            .map_err(|e| DomainError::InvalidQuery(format!("Failed to parse client query: {}", e)))?;

        if parsed.queries().is_empty() {
            return Err(DomainError::InvalidQuery("query has no question".to_string()));
        }

        let domain = question_name(&parsed);

        match self.walk(parsed, query.to_vec(), start_server, 0).await {
            Err(DomainError::HopLimitExceeded { limit }) => {
                debug!(domain = %domain, limit, "Resolution abandoned at nesting limit");
                Err(DomainError::ResolutionExhausted { domain })
            }
            other => other,
        }
    }
}

fn question_name(query: &Message) -> String {
    query
        .queries()
        .first()
        .map(|q| q.name().to_utf8())
        .unwrap_or_default()
}

fn referral_targets(message: &Message) -> Vec<Name> {
    message
        .name_servers()
        .iter()
        .filter_map(|record| match record.data() {
            RData::NS(ns) => Some(ns.0.clone()),
            _ => None,
        })
        .collect()
}

fn address_of(record: &Record) -> Option<IpAddr> {
    match record.data() {
        RData::A(a) => Some(IpAddr::V4(a.0)),
        _ => None,
    }
}

fn first_address(records: &[Record]) -> Option<IpAddr> {
    records.iter().find_map(address_of)
}

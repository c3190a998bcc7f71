use crate::DomainError;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// A configured root server, written as `hostname:ip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootHint {
    pub hostname: Arc<str>,
    pub address: IpAddr,
}

impl FromStr for RootHint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The hostname never contains ':' so the first one separates it from
        // the address, which keeps IPv6 addresses intact.
        let (hostname, ip) = s
            .split_once(':')
            .ok_or_else(|| DomainError::InvalidRootServer(format!("expected hostname:ip, got '{}'", s)))?;

        let hostname = hostname.trim().trim_end_matches('.');
        if hostname.is_empty() {
            return Err(DomainError::InvalidRootServer(format!(
                "missing hostname in '{}'",
                s
            )));
        }

        let ip = ip.trim().trim_start_matches('[').trim_end_matches(']');
        let address = ip
            .parse::<IpAddr>()
            .map_err(|_| DomainError::InvalidRootServer(format!("invalid address in '{}'", s)))?;

        Ok(Self {
            hostname: hostname.into(),
            address,
        })
    }
}

impl fmt::Display for RootHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" [{}]", self.hostname, self.address)
    }
}

/// A root server annotated with the latencies measured at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCandidate {
    pub hostname: Arc<str>,
    pub address: IpAddr,
    pub tcp: Option<Duration>,
    pub udp: Option<Duration>,
}

impl ServerCandidate {
    pub fn new(hint: &RootHint, tcp: Option<Duration>, udp: Option<Duration>) -> Self {
        Self {
            hostname: hint.hostname.clone(),
            address: hint.address,
            tcp,
            udp,
        }
    }

    pub fn is_reachable_over_udp(&self) -> bool {
        self.udp.is_some()
    }
}

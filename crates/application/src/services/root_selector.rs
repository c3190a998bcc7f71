use ferrous_recursor_domain::{DomainError, ServerCandidate};
use std::net::IpAddr;
use std::sync::Arc;

/// Picks the server a resolution starts from, favouring low UDP latency while
/// still giving every reachable root a chance.
#[derive(Debug, Clone)]
pub struct RootServerSelector {
    // Reachable candidates sorted by ascending UDP latency; never empty.
    ranked: Arc<[ServerCandidate]>,
}

impl RootServerSelector {
    pub fn new(candidates: &[ServerCandidate]) -> Result<Self, DomainError> {
        let mut ranked: Vec<ServerCandidate> = candidates
            .iter()
            .filter(|c| c.is_reachable_over_udp())
            .cloned()
            .collect();

        if ranked.is_empty() {
            return Err(DomainError::NoReachableRootServers);
        }

        ranked.sort_by_key(|c| c.udp);

        Ok(Self {
            ranked: ranked.into(),
        })
    }

    pub fn pick(&self) -> IpAddr {
        self.pick_with(&mut fastrand::Rng::new())
    }

    /// Walk the ranking and stop at each candidate with probability 1/2,
    /// falling back to the slowest one.
    pub fn pick_with(&self, rng: &mut fastrand::Rng) -> IpAddr {
        let slowest = &self.ranked[self.ranked.len() - 1];
        self.ranked
            .iter()
            .find(|_| rng.bool())
            .unwrap_or(slowest)
            .address
    }

    pub fn candidates(&self) -> &[ServerCandidate] {
        &self.ranked
    }
}

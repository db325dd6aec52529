//! Domain to IP address resolution.
//!
//! This module provides the [`DomainResolver`] seam used by the lookup
//! orchestrator and its hickory-backed implementation.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

use crate::config::AddressPreference;
use crate::error_handling::ResolutionError;
use crate::models::ResolvedAddress;

/// Maps a hostname to a single IP address.
#[async_trait]
pub trait DomainResolver: Send + Sync {
    /// Resolves `domain` to one address.
    ///
    /// # Errors
    ///
    /// Returns `ResolutionError` for every kind of failure; callers cannot tell
    /// NXDOMAIN from a timeout.
    async fn resolve(&self, domain: &str) -> Result<ResolvedAddress, ResolutionError>;
}

/// [`DomainResolver`] backed by an async hickory resolver.
#[derive(Clone)]
pub struct DnsResolver {
    resolver: Arc<TokioAsyncResolver>,
    preference: AddressPreference,
}

impl DnsResolver {
    /// Wraps a resolver built by [`init_resolver`](crate::initialization::init_resolver).
    pub fn new(resolver: Arc<TokioAsyncResolver>, preference: AddressPreference) -> Self {
        Self {
            resolver,
            preference,
        }
    }
}

#[async_trait]
impl DomainResolver for DnsResolver {
    async fn resolve(&self, domain: &str) -> Result<ResolvedAddress, ResolutionError> {
        let failed = || ResolutionError {
            domain: domain.to_string(),
        };

        // An IP literal is its own answer
        if let Ok(ip) = domain.parse::<IpAddr>() {
            return Ok(ResolvedAddress::new(ip));
        }

        let addresses: Vec<IpAddr> = match self.resolver.lookup_ip(domain).await {
            Ok(lookup) => lookup.iter().collect(),
            Err(e) => {
                log::debug!("DNS lookup for {domain} failed: {e}");
                return Err(failed());
            }
        };

        let selected = select_address(&addresses, self.preference).ok_or_else(|| {
            log::debug!("DNS lookup for {domain} returned no addresses");
            failed()
        })?;
        log::debug!(
            "Resolved {domain} to {selected} ({} candidate{}, preference {:?})",
            addresses.len(),
            if addresses.len() == 1 { "" } else { "s" },
            self.preference
        );
        Ok(ResolvedAddress::new(selected))
    }
}

/// Picks one address according to `preference`.
///
/// Falls back to the first address when no address of the preferred family
/// exists. Returns `None` only for an empty slice.
pub fn select_address(addresses: &[IpAddr], preference: AddressPreference) -> Option<IpAddr> {
    let preferred = match preference {
        AddressPreference::First => None,
        AddressPreference::Ipv4 => addresses.iter().find(|ip| ip.is_ipv4()),
        AddressPreference::Ipv6 => addresses.iter().find(|ip| ip.is_ipv6()),
    };
    preferred.or_else(|| addresses.first()).copied()
}

//! DNS resolver initialization.
//!
//! This module provides the function that builds the DNS resolver used for
//! domain lookups.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{LookupIpStrategy, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver for hostname lookups.
///
/// Uses the system resolver configuration (`/etc/resolv.conf` or the platform
/// equivalent) and falls back to hickory's default upstreams when it cannot be
/// read. Options are overridden so that each lookup is a single attempt with a
/// bounded timeout, and both A and AAAA records are requested so any
/// [`AddressPreference`](crate::config::AddressPreference) can be honoured.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    let config = match hickory_resolver::system_conf::read_system_conf() {
        Ok((config, _)) => config,
        Err(e) => {
            log::warn!("Failed to read system DNS configuration ({e}), using default upstreams");
            ResolverConfig::default()
        }
    };

    Arc::new(TokioAsyncResolver::tokio(config, resolver_opts()))
}

fn resolver_opts() -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(crate::config::DNS_TIMEOUT_SECS);
    opts.attempts = 1;
    // Names are looked up as given, never with search domains appended
    opts.ndots = 0;
    opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    opts
}

//! DNS resolution.
//!
//! This module provides async hostname resolution using `hickory-resolver`,
//! reduced to the single address the reputation check needs. Which address is
//! chosen when several come back is an explicit [`AddressPreference`].
//!
//! [`AddressPreference`]: crate::config::AddressPreference

mod resolution;

// Re-export public API
pub use resolution::{select_address, DnsResolver, DomainResolver};

//! Domain input validation and normalization.

use std::net::IpAddr;

use log::debug;

use crate::config::MAX_DOMAIN_LENGTH;
use crate::error_handling::InputError;

/// Validates and normalizes a domain typed by the user.
///
/// Trims surrounding whitespace, accepts a pasted URL by keeping only its host,
/// and checks what remains is a hostname or an IP literal. Hostnames come back
/// lowercased and IDNA-encoded, the form DNS expects.
///
/// # Arguments
///
/// * `raw` - The domain string as entered
///
/// # Returns
///
/// The normalized host to resolve.
///
/// # Errors
///
/// - `InputError::EmptyDomain` for empty or whitespace-only input
/// - `InputError::TooLong` when the host exceeds the DNS name limit
/// - `InputError::InvalidDomain` when the input is not a host at all
pub fn validate_domain_input(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyDomain);
    }

    let candidate = if trimmed.contains("://") {
        let parsed =
            url::Url::parse(trimmed).map_err(|_| InputError::InvalidDomain(trimmed.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| InputError::InvalidDomain(trimmed.to_string()))?;
        debug!("Using host '{host}' from pasted URL");
        host.trim_start_matches('[').trim_end_matches(']').to_string()
    } else {
        trimmed.to_string()
    };

    if candidate.len() > MAX_DOMAIN_LENGTH {
        return Err(InputError::TooLong(candidate.len()));
    }

    if let Ok(ip) = candidate.parse::<IpAddr>() {
        return Ok(ip.to_string());
    }

    match url::Host::parse(&candidate) {
        Ok(url::Host::Domain(domain)) if is_plausible_hostname(&domain) => Ok(domain),
        Ok(url::Host::Domain(_)) | Err(_) => Err(InputError::InvalidDomain(candidate)),
        Ok(url::Host::Ipv4(ip)) => Ok(ip.to_string()),
        Ok(url::Host::Ipv6(ip)) => Ok(ip.to_string()),
    }
}

/// Labels must be non-empty and only use LDH characters (plus `_` for service names).
fn is_plausible_hostname(domain: &str) -> bool {
    let name = domain.strip_suffix('.').unwrap_or(domain);
    !name.is_empty()
        && name.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
}

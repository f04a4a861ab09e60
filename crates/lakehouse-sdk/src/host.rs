//! Driver host identity: the machine name and the address executors call back to.

use std::fmt;
use std::net::IpAddr;

use crate::error::{GeneratorError, GeneratorResult};

/// Hostname plus the address it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
    pub hostname: String,
    pub address: IpAddr,
}

impl HostIdentity {
    pub fn new(hostname: impl Into<String>, address: IpAddr) -> Self {
        Self {
            hostname: hostname.into(),
            address,
        }
    }
}

impl fmt::Display for HostIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.hostname, self.address)
    }
}

/// Where the generator gets its host identity from.
#[derive(Debug, Clone, Default)]
pub enum HostSource {
    /// The machine's own hostname, resolved through the system resolver.
    #[default]
    Local,
    /// An explicit name, resolved through the system resolver.
    Named(String),
    /// A pre-resolved identity; no lookup is performed.
    Fixed(HostIdentity),
}

impl HostSource {
    pub async fn resolve(&self) -> GeneratorResult<HostIdentity> {
        match self {
            Self::Local => resolve_host_identity().await,
            Self::Named(name) => resolve_named_host(name).await,
            Self::Fixed(identity) => Ok(identity.clone()),
        }
    }
}

/// Resolve the local hostname and its address.
pub async fn resolve_host_identity() -> GeneratorResult<HostIdentity> {
    let hostname = hostname::get()
        .map_err(GeneratorError::Hostname)?
        .to_string_lossy()
        .into_owned();

    resolve_named_host(&hostname).await
}

/// Resolve `hostname` to a single address, preferring IPv4.
pub async fn resolve_named_host(hostname: &str) -> GeneratorResult<HostIdentity> {
    let addresses: Vec<IpAddr> = tokio::net::lookup_host((hostname, 0))
        .await
        .map_err(|source| GeneratorError::HostResolution {
            hostname: hostname.to_string(),
            source,
        })?
        .map(|addr| addr.ip())
        .collect();

    let address = select_address(&addresses).ok_or_else(|| GeneratorError::NoAddress {
        hostname: hostname.to_string(),
    })?;

    tracing::debug!(hostname, %address, candidates = addresses.len(), "Resolved driver host");

    Ok(HostIdentity::new(hostname, address))
}

/// First IPv4 address if any, otherwise the first address.
pub(crate) fn select_address(addresses: &[IpAddr]) -> Option<IpAddr> {
    addresses
        .iter()
        .copied()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addresses.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_select_address_prefers_ipv4() {
        let addresses = [
            IpAddr::V6(Ipv6Addr::LOCALHOST),
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)),
        ];
        assert_eq!(
            select_address(&addresses),
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)))
        );
    }

    #[test]
    fn test_select_address_falls_back_to_ipv6() {
        let addresses = [IpAddr::V6(Ipv6Addr::LOCALHOST)];
        assert_eq!(
            select_address(&addresses),
            Some(IpAddr::V6(Ipv6Addr::LOCALHOST))
        );
    }

    #[test]
    fn test_select_address_empty() {
        assert_eq!(select_address(&[]), None);
    }

    #[tokio::test]
    async fn test_resolve_ip_literal() {
        let identity = resolve_named_host("127.0.0.1").await.unwrap();
        assert_eq!(identity.hostname, "127.0.0.1");
        assert_eq!(identity.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn test_resolve_unknown_host_is_lookup_error() {
        let err = resolve_named_host("no-such-host.invalid").await.unwrap_err();
        assert!(matches!(err, GeneratorError::HostResolution { .. }));
        assert!(err.to_string().contains("no-such-host.invalid"));
    }

    #[tokio::test]
    async fn test_fixed_source_skips_lookup() {
        let identity = HostIdentity::new("worker-1", IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)));
        let resolved = HostSource::Fixed(identity.clone()).resolve().await.unwrap();
        assert_eq!(resolved, identity);
    }

    #[tokio::test]
    async fn test_local_identity_is_ip_literal() {
        // Sandboxed CI hosts may not resolve their own name; only assert on success.
        if let Ok(identity) = resolve_host_identity().await {
            assert!(identity.address.to_string().parse::<IpAddr>().is_ok());
            assert!(!identity.hostname.is_empty());
        }
    }
}

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use tokio::net::lookup_host;
use tracing::debug;

use crate::error::{FingerprintError, Result};

/// Target given on the command line: an IP literal or a host name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetHost {
    Ip(IpAddr),
    Domain(String),
}

impl TargetHost {
    /// Only rejects strings no resolver could accept; name syntax is left
    /// to `lookup_host`.
    fn validate_domain(domain: &str) -> bool {
        !domain.is_empty()
            && domain.len() <= 254
            && !domain.chars().any(|c| c.is_whitespace() || c.is_control())
    }

    /// Map the target to a single socket address.
    ///
    /// IPv4 results are preferred; the first IPv6 result is used only when no
    /// IPv4 address exists.
    pub async fn resolve(&self, port: u16) -> Result<SocketAddr> {
        match self {
            TargetHost::Ip(ip) => Ok(SocketAddr::new(*ip, port)),
            TargetHost::Domain(domain) => {
                debug!("Resolving DNS for: {}", domain);
                let addresses: Vec<SocketAddr> = lookup_host((domain.as_str(), port))
                    .await
                    .map_err(|e| FingerprintError::Resolve {
                        host: domain.clone(),
                        reason: e.to_string(),
                    })?
                    .collect();
                let chosen = addresses
                    .iter()
                    .find(|addr| addr.is_ipv4())
                    .or_else(|| addresses.first())
                    .copied()
                    .ok_or_else(|| FingerprintError::Resolve {
                        host: domain.clone(),
                        reason: "no addresses found".to_string(),
                    })?;
                debug!(%domain, %chosen, candidates = addresses.len(), "resolved target");
                Ok(chosen)
            }
        }
    }
}

impl fmt::Display for TargetHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetHost::Ip(ip) => write!(f, "{ip}"),
            TargetHost::Domain(domain) => write!(f, "{domain}"),
        }
    }
}

impl FromStr for TargetHost {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let literal = s
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(s);
        if let Ok(ip) = literal.parse::<IpAddr>() {
            return Ok(TargetHost::Ip(ip));
        }

        // Scoped IPv6 literals (`fe80::1%eth0`) fail `IpAddr` parsing but
        // resolve through the system resolver.
        if !Self::validate_domain(literal) {
            return Err(FingerprintError::InvalidTarget(format!("invalid host name: {s:?}")));
        }

        Ok(TargetHost::Domain(literal.to_string()))
    }
}

/// Resolve `host` once, before any probe is sent
pub async fn resolve_target(host: &TargetHost, port: u16) -> Result<SocketAddr> {
    host.resolve(port).await
}

//! Local hostname resolution.

use std::net::{IpAddr, ToSocketAddrs};

/// Resolves the address this process is reachable at.
pub trait HostResolver: Send + Sync {
    /// Address of the local hostname, or `None` when it cannot be resolved.
    fn local_address(&self) -> Option<IpAddr>;
}

/// Looks up the system hostname through the system resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostResolver;

impl HostResolver for SystemHostResolver {
    fn local_address(&self) -> Option<IpAddr> {
        let hostname = match nix::unistd::gethostname() {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read local hostname");
                return None;
            }
        };
        let hostname = hostname.to_str()?;
        if hostname.is_empty() {
            return None;
        }

        match (hostname, 0).to_socket_addrs() {
            Ok(addrs) => {
                let addrs: Vec<IpAddr> = addrs.map(|a| a.ip()).collect();
                // gethostbyname semantics: IPv4 first
                addrs
                    .iter()
                    .find(|ip| ip.is_ipv4())
                    .or_else(|| addrs.first())
                    .copied()
            }
            Err(e) => {
                tracing::debug!(
                    hostname = %hostname,
                    error = %e,
                    "Failed to resolve local hostname"
                );
                None
            }
        }
    }
}

/// Always answers with the same address.
impl HostResolver for Option<IpAddr> {
    fn local_address(&self) -> Option<IpAddr> {
        *self
    }
}

//! # Host-only CIDR
//!
//! The configured range the guest VM is expected to live in, written as the
//! *host* side address plus prefix, e.g. `192.168.99.1/24`.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::NetworkError;

/// A validated host-only CIDR.
///
/// The address is always a host address: `192.168.99.0/24` is rejected
/// because it names the network itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostOnlyCidr {
    network: Ipv4Network,
}

impl HostOnlyCidr {
    /// Host address the adapter must carry.
    pub fn ip(&self) -> Ipv4Addr {
        self.network.ip()
    }

    pub fn netmask(&self) -> Ipv4Addr {
        self.network.mask()
    }

    /// Network base address, e.g. `192.168.99.0`.
    pub fn network(&self) -> Ipv4Addr {
        self.network.network()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }
}

impl FromStr for HostOnlyCidr {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.contains('/') {
            return Err(NetworkError::InvalidCidr(s.to_string()));
        }

        let network = s
            .parse::<Ipv4Network>()
            .map_err(|_| NetworkError::InvalidCidr(s.to_string()))?;

        if network.ip() == network.network() {
            return Err(NetworkError::NetworkAddrCidr);
        }

        Ok(Self { network })
    }
}

impl fmt::Display for HostOnlyCidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ip(), self.prefix())
    }
}

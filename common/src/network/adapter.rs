//! # Host-only adapter records
//!
//! Records built from `VBoxManage list hostonlyifs` and
//! `VBoxManage list dhcpservers`. They are rebuilt on every query and never
//! mutated afterwards.

use std::collections::{BTreeMap, HashMap};
use std::net::Ipv4Addr;

use pnet::util::MacAddr;

use crate::error::{NetworkError, ParseError};
use crate::utils::output::{colon_line, parse_key_values};

/// Netmask some VirtualBox releases report for a freshly created adapter.
pub const BUGGY_NETMASK: Ipv4Addr = Ipv4Addr::new(0x0f, 0x00, 0x00, 0x00);

/// A host-only network adapter as seen by the hypervisor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostOnlyNetwork {
    /// Host-visible interface name (`vboxnet0`, `VirtualBox Host-Only Ethernet Adapter`).
    pub name: String,
    pub guid: String,
    pub dhcp: bool,
    pub ipv4: Option<Ipv4Addr>,
    pub netmask: Option<Ipv4Addr>,
    pub hw_addr: Option<MacAddr>,
    pub medium: String,
    pub status: String,
    /// Internal network name. DHCP servers and lease files are keyed by it.
    pub network_name: String,
}

impl HostOnlyNetwork {
    /// Netmask rendered as eight hex digits, e.g. `ffffff00`.
    pub fn netmask_hex(&self) -> Option<String> {
        self.netmask.map(|mask| format!("{:08x}", u32::from(mask)))
    }

    /// True when this adapter carries `ip` with either `netmask` or the
    /// buggy placeholder mask.
    pub fn serves(&self, ip: Ipv4Addr, netmask: Ipv4Addr) -> bool {
        self.ipv4 == Some(ip) && matches!(self.netmask, Some(m) if m == netmask || m == BUGGY_NETMASK)
    }
}

/// A DHCP server record keyed by internal network name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DhcpServer {
    pub network_name: String,
    pub ipv4: Option<Ipv4Addr>,
    pub netmask: Option<Ipv4Addr>,
    pub lower_ip: Option<Ipv4Addr>,
    pub upper_ip: Option<Ipv4Addr>,
    pub enabled: bool,
}

/// Adapters keyed by internal network name.
pub type HostOnlyNetworks = BTreeMap<String, HostOnlyNetwork>;

/// Collects adapter fields until `VBoxNetworkName` arrives, then seals the
/// record into the directory.
#[derive(Debug, Default)]
struct AdapterAccumulator {
    pending: HostOnlyNetwork,
    by_name: HostOnlyNetworks,
    by_ip: HashMap<Ipv4Addr, String>,
}

impl AdapterAccumulator {
    fn feed(&mut self, key: &str, value: &str) -> Result<(), NetworkError> {
        match key {
            "Name" => self.pending.name = value.to_string(),
            "GUID" => self.pending.guid = value.to_string(),
            "DHCP" => self.pending.dhcp = value != "Disabled",
            "IPAddress" => self.pending.ipv4 = value.parse().ok(),
            "NetworkMask" => self.pending.netmask = value.parse().ok(),
            "HardwareAddress" => {
                let mac = value
                    .parse::<MacAddr>()
                    .map_err(|_| ParseError::HardwareAddress(value.to_string()))?;
                self.pending.hw_addr = Some(mac);
            }
            "MediumType" => self.pending.medium = value.to_string(),
            "Status" => self.pending.status = value.to_string(),
            "VBoxNetworkName" => {
                self.pending.network_name = value.to_string();
                self.seal()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn seal(&mut self) -> Result<(), NetworkError> {
        let adapter = std::mem::take(&mut self.pending);

        if self.by_name.contains_key(&adapter.network_name) {
            return Err(NetworkError::DuplicateName(adapter.network_name));
        }

        if let Some(ip) = adapter.ipv4 {
            if self.by_ip.contains_key(&ip) {
                return Err(NetworkError::DuplicateIp(ip));
            }
            self.by_ip.insert(ip, adapter.network_name.clone());
        }

        self.by_name.insert(adapter.network_name.clone(), adapter);
        Ok(())
    }
}

/// Parses `VBoxManage list hostonlyifs` output.
///
/// Fails on duplicate internal network names or duplicate IPv4 addresses;
/// either makes the configuration ambiguous. Trailing fields without a
/// `VBoxNetworkName` line are dropped.
pub fn parse_host_only_networks(text: &str) -> Result<HostOnlyNetworks, NetworkError> {
    let mut acc = AdapterAccumulator::default();
    parse_key_values(text, colon_line(), |key, value| acc.feed(key, value))?;
    Ok(acc.by_name)
}

/// Parses `VBoxManage list dhcpservers` output.
///
/// Older releases print `IP`, `lowerIPAddress` and `upperIPAddress`, newer
/// ones `Dhcpd IP`, `LowerIPAddress` and `UpperIPAddress`; both are accepted.
pub fn parse_dhcp_servers(text: &str) -> Result<BTreeMap<String, DhcpServer>, NetworkError> {
    let mut servers: BTreeMap<String, DhcpServer> = BTreeMap::new();
    let mut current: Option<String> = None;

    parse_key_values(text, colon_line(), |key, value| -> Result<(), NetworkError> {
        if key == "NetworkName" {
            servers.insert(
                value.to_string(),
                DhcpServer {
                    network_name: value.to_string(),
                    ..Default::default()
                },
            );
            current = Some(value.to_string());
            return Ok(());
        }

        let Some(server) = current.as_ref().and_then(|name| servers.get_mut(name)) else {
            return Ok(());
        };

        match key {
            "IP" | "Dhcpd IP" => server.ipv4 = value.parse().ok(),
            "NetworkMask" => server.netmask = value.parse().ok(),
            "lowerIPAddress" | "LowerIPAddress" => server.lower_ip = value.parse().ok(),
            "upperIPAddress" | "UpperIPAddress" => server.upper_ip = value.parse().ok(),
            "Enabled" => server.enabled = value == "Yes",
            _ => {}
        }
        Ok(())
    })?;

    Ok(servers)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

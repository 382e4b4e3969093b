//! # Host-Only Network Directory
//!
//! Fresh listings of adapters and DHCP servers, the CIDR matcher, and the
//! purge of a stale adapter.

use std::collections::BTreeMap;

use gokube_common::error::NetworkError;
use gokube_common::network::adapter::{
    DhcpServer, HostOnlyNetwork, HostOnlyNetworks, parse_dhcp_servers, parse_host_only_networks,
};
use gokube_common::network::cidr::HostOnlyCidr;
use gokube_common::vm::Removal;
use tracing::debug;

use crate::vbox::VBoxManage;

/// Every host-only adapter, keyed by internal network name.
pub async fn list_host_only_networks(vbox: &VBoxManage) -> Result<HostOnlyNetworks, NetworkError> {
    let out = vbox.run_out(&["list", "hostonlyifs"]).await?;
    parse_host_only_networks(&out)
}

/// Every DHCP server, keyed by internal network name.
pub async fn list_dhcp_servers(
    vbox: &VBoxManage,
) -> Result<BTreeMap<String, DhcpServer>, NetworkError> {
    let out = vbox
        .run_out(&["list", "dhcpservers"])
        .await
        .map_err(NetworkError::DhcpListing)?;
    parse_dhcp_servers(&out)
}

/// The adapter carrying the CIDR's host address, if any.
///
/// The netmask must match too, unless the adapter reports the buggy
/// `0f000000` mask of a freshly created interface.
pub fn find_host_only_network<'a>(
    nets: &'a HostOnlyNetworks,
    cidr: &HostOnlyCidr,
) -> Option<&'a HostOnlyNetwork> {
    nets.values()
        .find(|net| net.serves(cidr.ip(), cidr.netmask()))
}

/// Removes the adapter serving `cidr` together with its DHCP server.
///
/// Nothing to remove is a [`Removal::NotFound`], not an error.
pub async fn purge_host_only_network(
    vbox: &VBoxManage,
    cidr: &str,
) -> Result<Removal, NetworkError> {
    let cidr: HostOnlyCidr = cidr.parse()?;
    let nets = list_host_only_networks(vbox).await?;

    let Some(net) = find_host_only_network(&nets, &cidr) else {
        debug!("No host-only network serves {cidr}, nothing to purge");
        return Ok(Removal::NotFound);
    };

    let servers = list_dhcp_servers(vbox).await?;
    if servers.contains_key(&net.network_name) {
        debug!("Removing DHCP server {}", net.network_name);
        vbox.run(&["dhcpserver", "remove", "--netname", net.network_name.as_str()])
            .await
            .map_err(|source| NetworkError::Removal {
                name: net.network_name.clone(),
                source,
            })?;
    }

    debug!("Removing host-only interface {}", net.name);
    vbox.run(&["hostonlyif", "remove", net.name.as_str()])
        .await
        .map_err(|source| NetworkError::Removal {
            name: net.name.clone(),
            source,
        })?;

    Ok(Removal::Removed)
}

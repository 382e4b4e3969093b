//! Host-only networking on the VirtualBox side.

pub mod hostonly;
pub mod leases;

pub use hostonly::{
    find_host_only_network, list_dhcp_servers, list_host_only_networks, purge_host_only_network,
};
pub use leases::{LeaseReset, reset_host_only_network_leases};

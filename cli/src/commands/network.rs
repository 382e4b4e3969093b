use std::time::Duration;

use anyhow::Context;
use colored::*;
use gokube_common::config::Config;
use gokube_common::error::NetworkError;
use gokube_common::network::adapter::HostOnlyNetwork;
use gokube_common::vm::Removal;
use gokube_common::{info, success, warn};
use gokube_core::network::{
    LeaseReset, list_dhcp_servers, list_host_only_networks, purge_host_only_network,
    reset_host_only_network_leases,
};
use gokube_core::vbox::VBoxManage;

use crate::gprint;
use crate::terminal::spinner::Spinner;
use crate::terminal::{colors, print};

pub async fn list(vbox: &VBoxManage, cfg: &Config) -> anyhow::Result<()> {
    let nets = list_host_only_networks(vbox).await?;
    let servers = list_dhcp_servers(vbox).await?;

    print::header("host-only networks", cfg.quiet);
    if nets.is_empty() {
        info!("No host-only network configured");
        return Ok(());
    }

    for (idx, net) in nets.values().enumerate() {
        let mut details = adapter_details(net);
        if let Some(server) = servers.get(&net.network_name) {
            let pool = match (server.lower_ip, server.upper_ip) {
                (Some(lower), Some(upper)) => format!("{lower} - {upper}"),
                _ => "unknown".to_string(),
            };
            let state = if server.enabled { "enabled" } else { "disabled" };
            details.push(("DHCP".to_string(), format!("{pool} ({state})").normal()));
        }

        print::tree_head(idx, &net.name);
        print::as_tree_one_level(details);
        if idx + 1 != nets.len() {
            gprint!();
        }
    }

    Ok(())
}

fn adapter_details(net: &HostOnlyNetwork) -> Vec<(String, ColoredString)> {
    let ip = match (net.ipv4, net.netmask_hex()) {
        (Some(ip), Some(mask)) => format!("{ip} / {mask}").color(colors::IPV4),
        (Some(ip), None) => ip.to_string().color(colors::IPV4),
        _ => "none".dimmed(),
    };
    let mac = net
        .hw_addr
        .map_or_else(|| "none".dimmed(), |mac| mac.to_string().color(colors::MAC_ADDR));

    vec![
        ("Network".to_string(), net.network_name.as_str().color(colors::SECONDARY)),
        ("IPv4".to_string(), ip),
        ("MAC".to_string(), mac),
        ("Status".to_string(), net.status.as_str().normal()),
    ]
}

/// Resets the leases, retrying while lease files are still locked by a
/// VM that was just deleted.
pub async fn reset_leases(
    vbox: &VBoxManage,
    cfg: &Config,
    cidr: Option<String>,
    attempts: u32,
    interval: Duration,
) -> anyhow::Result<()> {
    let cidr = cidr.unwrap_or_else(|| cfg.host_only_cidr.clone());
    let lease_dir = cfg.lease_dir();

    let spinner = Spinner::start(format!("Resetting DHCP leases for {cidr}"), cfg.quiet);
    let outcome = retry_transient(attempts, interval, || {
        reset_host_only_network_leases(vbox, &cidr, &lease_dir)
    })
    .await
    .with_context(|| format!("cannot reset DHCP leases for {cidr}"))?;
    drop(spinner);

    match outcome {
        LeaseReset::NoMatchingNetwork => {
            info!("No host-only network serves {cidr}, leases left untouched");
        }
        LeaseReset::Reset { network_name, removed } => {
            success!(
                "Removed {} lease file(s) of {network_name}",
                removed.len().to_string().green().bold()
            );
        }
    }
    Ok(())
}

/// Runs `op` up to `attempts` times, sleeping `interval` after each
/// transient failure. Any other error is returned at once.
async fn retry_transient<T, F, Fut>(
    attempts: u32,
    interval: Duration,
    mut op: F,
) -> Result<T, NetworkError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, NetworkError>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts && is_transient(&e) => {
                warn!("Attempt {attempt}/{attempts} failed: {e}, retrying in {}s", interval.as_secs());
                tokio::time::sleep(interval).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Lease files can stay locked for a few seconds after a VM is deleted.
fn is_transient(err: &NetworkError) -> bool {
    matches!(
        err,
        NetworkError::LeaseRemoval { .. } | NetworkError::LeaseDirectory { .. }
    )
}

pub async fn purge(vbox: &VBoxManage, cfg: &Config, cidr: Option<String>) -> anyhow::Result<()> {
    let cidr = cidr.unwrap_or_else(|| cfg.host_only_cidr.clone());
    print::header("purging host-only network", cfg.quiet);

    match purge_host_only_network(vbox, &cidr)
        .await
        .with_context(|| format!("cannot purge host-only network for {cidr}"))?
    {
        Removal::Removed => success!("Host-only network serving {cidr} removed"),
        Removal::NotFound => info!("No host-only network serves {cidr}"),
    }
    Ok(())
}

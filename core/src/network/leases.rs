//! # DHCP Lease Reconciler
//!
//! VirtualBox's DHCP server keeps lease bindings after the VM they were
//! handed to is gone, so a recreated VM may get another address. Dropping
//! the lease files of the network serving the configured CIDR forgets them.
//!
//! Lease files are locked for a moment after a VM is deleted. Retrying on
//! that is left to the caller.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use gokube_common::error::NetworkError;
use gokube_common::network::cidr::HostOnlyCidr;
use tracing::debug;

use super::hostonly::{find_host_only_network, list_host_only_networks};
use crate::vbox::VBoxManage;

/// What a lease reset did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaseReset {
    /// No host-only network uses the CIDR, so there is nothing to reset.
    NoMatchingNetwork,
    Reset {
        network_name: String,
        removed: Vec<PathBuf>,
    },
}

/// Deletes `<lease_dir>/<network name>*` for the adapter serving `cidr`.
///
/// The CIDR is validated before `VBoxManage` is invoked. Deletion stops at
/// the first file that cannot be removed; files removed before it stay
/// removed.
pub async fn reset_host_only_network_leases(
    vbox: &VBoxManage,
    cidr: &str,
    lease_dir: &Path,
) -> Result<LeaseReset, NetworkError> {
    let cidr: HostOnlyCidr = cidr.parse()?;
    debug!("Resetting leases for {cidr} (network {})", cidr.network());

    let nets = list_host_only_networks(vbox).await?;
    debug!("Found {} host-only networks", nets.len());

    let Some(net) = find_host_only_network(&nets, &cidr) else {
        debug!("No host-only network found for {cidr}");
        return Ok(LeaseReset::NoMatchingNetwork);
    };
    debug!("Host-only network {} matches {cidr}", net.network_name);

    let files = lease_files(lease_dir, &net.network_name)?;
    let mut removed = Vec::with_capacity(files.len());

    for path in files {
        if let Err(source) = fs::remove_file(&path) {
            return Err(NetworkError::LeaseRemoval {
                path,
                removed: removed.len(),
                source,
            });
        }
        debug!("Deleted {}", path.display());
        removed.push(path);
    }

    Ok(LeaseReset::Reset {
        network_name: net.network_name.clone(),
        removed,
    })
}

/// Entries of `dir` whose file name starts with `prefix`, sorted.
///
/// A missing directory holds no leases.
fn lease_files(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>, NetworkError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(NetworkError::LeaseDirectory {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| NetworkError::LeaseDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_name().to_string_lossy().starts_with(prefix) {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

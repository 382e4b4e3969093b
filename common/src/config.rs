use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_VM_NAME: &str = "minikube";
pub const DEFAULT_SNAPSHOT_NAME: &str = "gokube";
pub const DEFAULT_HOST_ONLY_CIDR: &str = "192.168.99.1/24";

/// Runtime settings, resolved once at startup and passed down by reference.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the VirtualBox VM every VM-scoped operation targets.
    pub vm_name: String,
    /// Snapshot used by `save` and `reset` when none is given.
    pub snapshot_name: String,
    /// Expected host-only range for the guest, host side address included.
    pub host_only_cidr: String,
    /// User home. Lease files and the minikube machine directory hang off it.
    pub home: PathBuf,
    /// Swap disk size in MB. Zero disables swap provisioning.
    pub swap_mb: u32,
    pub verbose: bool,
    /// Skips headers and progress output.
    pub quiet: bool,
}

impl Config {
    /// Defaults overlaid with `GOKUBE_CIDR`, `MINIKUBE_SWAP` and `GOKUBE_QUIET`.
    pub fn from_env() -> anyhow::Result<Self> {
        let home = dirs::home_dir().context("cannot determine user home directory")?;
        Self::from_lookup(home, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an explicit home and variable source.
    pub fn from_lookup(
        home: PathBuf,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let swap_mb = match non_empty("MINIKUBE_SWAP") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("MINIKUBE_SWAP must be a size in MB, got {raw:?}"))?,
            None => 0,
        };

        Ok(Self {
            vm_name: DEFAULT_VM_NAME.to_string(),
            snapshot_name: DEFAULT_SNAPSHOT_NAME.to_string(),
            host_only_cidr: non_empty("GOKUBE_CIDR")
                .unwrap_or_else(|| DEFAULT_HOST_ONLY_CIDR.to_string()),
            home,
            swap_mb,
            verbose: false,
            quiet: non_empty("GOKUBE_QUIET").is_some(),
        })
    }

    /// Where VirtualBox keeps its DHCP lease files.
    pub fn lease_dir(&self) -> PathBuf {
        self.home.join(".VirtualBox")
    }

    /// The minikube machine-state directory of the configured VM.
    pub fn machine_dir(&self) -> PathBuf {
        self.home
            .join(".minikube")
            .join("machines")
            .join(&self.vm_name)
    }

    pub fn swap_disk_path(&self) -> PathBuf {
        self.machine_dir().join("swapdisk.vdi")
    }
}

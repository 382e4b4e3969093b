//! # Swap Disk Provisioner
//!
//! Creates a VDI image and plugs it into the VM's SATA controller. Both
//! steps are skipped when already done, so provisioning can be repeated.

use std::path::Path;

use gokube_common::error::{SwapError, VBoxError};
use tracing::debug;

use super::VirtualMachine;
use crate::vbox::VBoxManage;

const STORAGE_CONTROLLER: &str = "SATA";
pub const SWAP_PORT: u32 = 2;
pub const SWAP_DEVICE: u32 = 0;

/// Which provisioning steps actually ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    pub created: bool,
    pub attached: bool,
}

/// Creates a `size_mb` VDI image at `path`.
pub async fn create_disk(vbox: &VBoxManage, size_mb: u32, path: &Path) -> Result<(), VBoxError> {
    let filename = path.display().to_string();
    let size = format!("--size={size_mb}");
    vbox.run(&[
        "createmedium",
        "disk",
        "--filename",
        filename.as_str(),
        size.as_str(),
        "--format",
        "VDI",
    ])
    .await?;
    Ok(())
}

impl VirtualMachine<'_> {
    /// Attaches the image at `path` as a hard disk on `port`/`device`.
    pub async fn attach_disk(&self, port: u32, device: u32, path: &Path) -> Result<(), VBoxError> {
        let port = port.to_string();
        let device = device.to_string();
        let medium = path.display().to_string();
        self.vbox()
            .run(&[
                "storageattach",
                self.name(),
                "--storagectl",
                STORAGE_CONTROLLER,
                "--port",
                port.as_str(),
                "--device",
                device.as_str(),
                "--type",
                "hdd",
                "--medium",
                medium.as_str(),
            ])
            .await?;
        Ok(())
    }

    /// Makes sure a `size_mb` swap image exists at `path` and is attached.
    ///
    /// An existing file is never recreated and its size is not checked.
    pub async fn add_swap_disk(&self, size_mb: u32, path: &Path) -> Result<SwapOutcome, SwapError> {
        let created = if path.exists() {
            debug!("Swap disk {} already exists", path.display());
            false
        } else {
            create_disk(self.vbox(), size_mb, path)
                .await
                .map_err(SwapError::Create)?;
            true
        };

        let slot = format!("{STORAGE_CONTROLLER}-{SWAP_PORT}-{SWAP_DEVICE}");
        let props = self.properties().await.map_err(SwapError::Attach)?;
        let attached_here = props
            .get(&slot)
            .is_some_and(|medium| Path::new(medium) == path);

        let attached = if attached_here {
            debug!("Swap disk already attached at {slot}");
            false
        } else {
            self.attach_disk(SWAP_PORT, SWAP_DEVICE, path)
                .await
                .map_err(SwapError::Attach)?;
            true
        };

        Ok(SwapOutcome { created, attached })
    }
}

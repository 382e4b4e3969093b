use anyhow::Context;
use gokube_common::config::Config;
use gokube_common::{info, success, warn};
use gokube_core::machine::VirtualMachine;
use gokube_core::vbox::VBoxManage;

use super::power::ensure_stopped;
use crate::terminal::print;

pub async fn add(vbox: &VBoxManage, cfg: &Config, size: Option<u32>) -> anyhow::Result<()> {
    let size_mb = size.unwrap_or(cfg.swap_mb);
    if size_mb == 0 {
        warn!("No swap size given (--size or MINIKUBE_SWAP), nothing to do");
        return Ok(());
    }

    print::header("provisioning swap", cfg.quiet);
    let vm = VirtualMachine::new(vbox, &cfg.vm_name);
    ensure_stopped(&vm, "attach a disk").await?;

    let path = cfg.swap_disk_path();
    let outcome = vm
        .add_swap_disk(size_mb, &path)
        .await
        .with_context(|| format!("cannot provision swap for {}", cfg.vm_name))?;

    if !outcome.created {
        info!("Reusing existing swap disk {}", path.display());
    }

    if outcome.attached {
        success!("Swap disk {} attached to {}", path.display(), cfg.vm_name);
    } else {
        success!("Swap disk already attached to {}", cfg.vm_name);
    }
    Ok(())
}

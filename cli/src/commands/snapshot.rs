use anyhow::Context;
use gokube_common::config::Config;
use gokube_common::vm::Removal;
use gokube_common::{info, success};
use gokube_core::machine::VirtualMachine;
use gokube_core::vbox::VBoxManage;

use super::power::ensure_stopped;
use crate::terminal::print;

/// Replaces snapshot `name` with the current state of the VM.
pub async fn save(
    vbox: &VBoxManage,
    cfg: &Config,
    name: Option<String>,
    live: bool,
) -> anyhow::Result<()> {
    let name = name.unwrap_or_else(|| cfg.snapshot_name.clone());
    let vm = VirtualMachine::new(vbox, &cfg.vm_name);
    print::header("saving snapshot", cfg.quiet);

    if !live {
        ensure_stopped(&vm, "save it (or pass --live)").await?;
    }

    match vm
        .delete_snapshot(&name)
        .await
        .with_context(|| format!("cannot delete previous snapshot {name}"))?
    {
        Removal::Removed => info!("Previous snapshot {name} deleted"),
        Removal::NotFound => info!("No previous snapshot {name}"),
    }

    vm.take_snapshot(&name)
        .await
        .with_context(|| format!("cannot take snapshot {name}"))?;
    success!("Snapshot {name} of {} saved", cfg.vm_name);
    Ok(())
}

/// Rolls the VM back to snapshot `name`.
pub async fn reset(vbox: &VBoxManage, cfg: &Config, name: Option<String>) -> anyhow::Result<()> {
    let name = name.unwrap_or_else(|| cfg.snapshot_name.clone());
    let vm = VirtualMachine::new(vbox, &cfg.vm_name);
    print::header("restoring snapshot", cfg.quiet);

    ensure_stopped(&vm, "reset it").await?;

    vm.restore_snapshot(&name)
        .await
        .with_context(|| format!("cannot restore snapshot {name}"))?;
    success!("{} restored from snapshot {name}", cfg.vm_name);
    Ok(())
}

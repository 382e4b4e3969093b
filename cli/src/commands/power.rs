use anyhow::Context;
use gokube_common::config::Config;
use gokube_common::success;
use gokube_core::machine::VirtualMachine;
use gokube_core::vbox::VBoxManage;

pub async fn pause(vbox: &VBoxManage, cfg: &Config) -> anyhow::Result<()> {
    let vm = VirtualMachine::new(vbox, &cfg.vm_name);
    vm.pause()
        .await
        .with_context(|| format!("cannot pause {}", cfg.vm_name))?;
    success!("{} paused", cfg.vm_name);
    Ok(())
}

pub async fn resume(vbox: &VBoxManage, cfg: &Config) -> anyhow::Result<()> {
    let vm = VirtualMachine::new(vbox, &cfg.vm_name);
    vm.resume()
        .await
        .with_context(|| format!("cannot resume {}", cfg.vm_name))?;
    success!("{} resumed", cfg.vm_name);
    Ok(())
}

/// Fails when the VM runs; snapshots and disks are only touched offline.
pub async fn ensure_stopped(vm: &VirtualMachine<'_>, action: &str) -> anyhow::Result<()> {
    let running = vm
        .is_running()
        .await
        .with_context(|| format!("cannot read the state of {}", vm.name()))?;

    if running {
        anyhow::bail!(
            "{} is running, stop it first with 'minikube stop' before you {action}",
            vm.name()
        );
    }
    Ok(())
}

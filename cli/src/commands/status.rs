use anyhow::Context;
use colored::*;
use gokube_common::config::Config;
use gokube_common::network::cidr::HostOnlyCidr;
use gokube_common::vm::VmState;
use gokube_core::machine::VirtualMachine;
use gokube_core::network::{find_host_only_network, list_host_only_networks};
use gokube_core::vbox::VBoxManage;

use crate::terminal::{colors, print};

const KEY_WIDTH: usize = 12;

pub async fn status(vbox: &VBoxManage, cfg: &Config) -> anyhow::Result<()> {
    print::header("status", cfg.quiet);

    let vm = VirtualMachine::new(vbox, &cfg.vm_name);
    let state = vm
        .state()
        .await
        .with_context(|| format!("cannot read the state of {}", cfg.vm_name))?;

    print::aligned_line("VM", cfg.vm_name.as_str().color(colors::TEXT_DEFAULT), KEY_WIDTH);
    print::aligned_line("State", colored_state(&state), KEY_WIDTH);

    let cidr: HostOnlyCidr = cfg.host_only_cidr.parse()?;
    let nets = list_host_only_networks(vbox).await?;
    let network = match find_host_only_network(&nets, &cidr) {
        Some(net) => format!("{} ({})", net.name, net.network_name).color(colors::SECONDARY),
        None => "none".dimmed(),
    };
    print::aligned_line("Host-only", cidr.to_string().color(colors::IPV4), KEY_WIDTH);
    print::aligned_line("Network", network, KEY_WIDTH);

    let swap_path = cfg.swap_disk_path();
    let swap = if swap_path.exists() {
        swap_path.display().to_string().normal()
    } else {
        "none".dimmed()
    };
    print::aligned_line("Swap disk", swap, KEY_WIDTH);

    Ok(())
}

fn colored_state(state: &VmState) -> ColoredString {
    let text = state.to_string();
    match state {
        VmState::Running => text.green().bold(),
        VmState::Paused | VmState::Saved => text.yellow(),
        VmState::Aborted => text.red().bold(),
        VmState::Absent => text.dimmed(),
        VmState::PoweredOff | VmState::Other(_) => text.normal(),
    }
}

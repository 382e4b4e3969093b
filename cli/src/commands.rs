pub mod network;
pub mod power;
pub mod snapshot;
pub mod status;
pub mod swap;
pub mod version;

use clap::{Parser, Subcommand};
use gokube_common::config::Config;

#[derive(Parser)]
#[command(name = "gokube")]
#[command(about = "Keeps the VirtualBox side of a minikube VM in shape.", version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Show every VBoxManage invocation
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip headers and progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// VirtualBox VM to operate on
    #[arg(long, global = true, value_name = "NAME")]
    pub vm: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Take a snapshot of the VM, replacing any snapshot with the same name
    Save {
        /// Snapshot name
        #[arg(short, long)]
        name: Option<String>,
        /// Snapshot the VM while it is running
        #[arg(long)]
        live: bool,
    },
    /// Restore the VM from a snapshot
    Reset {
        /// Snapshot name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Pause the running VM
    Pause,
    /// Resume a paused VM
    Resume,
    /// Show VM state, host-only network and swap disk
    #[command(alias = "st")]
    Status,
    /// Inspect and repair host-only networking
    #[command(alias = "net")]
    Network {
        #[command(subcommand)]
        action: NetworkCommand,
    },
    /// Manage the VM swap disk
    Swap {
        #[command(subcommand)]
        action: SwapCommand,
    },
    /// Show the VirtualBox version and whether it is supported
    Version,
}

#[derive(Subcommand)]
pub enum NetworkCommand {
    /// List host-only adapters and their DHCP servers
    #[command(alias = "ls")]
    List,
    /// Forget the DHCP leases of the host-only network serving the CIDR
    ResetLeases {
        /// Host-only CIDR, host address included (e.g. 192.168.99.1/24)
        #[arg(long)]
        cidr: Option<String>,
        /// How many times to try while lease files are locked
        #[arg(long, default_value_t = 3)]
        attempts: u32,
        /// Seconds to wait between attempts
        #[arg(long, default_value_t = 5)]
        interval: u64,
    },
    /// Remove the host-only adapter serving the CIDR and its DHCP server
    Purge {
        /// Host-only CIDR, host address included (e.g. 192.168.99.1/24)
        #[arg(long)]
        cidr: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SwapCommand {
    /// Create and attach the swap disk
    Add {
        /// Size in MB, defaults to $MINIKUBE_SWAP
        #[arg(long)]
        size: Option<u32>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Overlays the global flags on `cfg`.
    pub fn apply(&self, cfg: &mut Config) {
        cfg.verbose |= self.verbose;
        cfg.quiet |= self.quiet;
        if let Some(vm) = &self.vm {
            cfg.vm_name = vm.clone();
        }
    }
}

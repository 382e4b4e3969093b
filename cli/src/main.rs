mod commands;
mod terminal;

use std::time::Duration;

use commands::{
    CommandLine, Commands, NetworkCommand, SwapCommand, network, power, snapshot, status, swap,
    version,
};
use gokube_common::config::Config;
use gokube_core::vbox::{VBoxManage, VBoxManagePath};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    let mut cfg = Config::from_env()?;
    commands.apply(&mut cfg);

    logging::init(cfg.verbose);

    let vbox = VBoxManage::new(VBoxManagePath::detect());

    match commands.command {
        Commands::Save { name, live } => snapshot::save(&vbox, &cfg, name, live).await,
        Commands::Reset { name } => snapshot::reset(&vbox, &cfg, name).await,
        Commands::Pause => power::pause(&vbox, &cfg).await,
        Commands::Resume => power::resume(&vbox, &cfg).await,
        Commands::Status => status::status(&vbox, &cfg).await,
        Commands::Network { action } => match action {
            NetworkCommand::List => network::list(&vbox, &cfg).await,
            NetworkCommand::ResetLeases {
                cidr,
                attempts,
                interval,
            } => {
                network::reset_leases(&vbox, &cfg, cidr, attempts, Duration::from_secs(interval))
                    .await
            }
            NetworkCommand::Purge { cidr } => network::purge(&vbox, &cfg, cidr).await,
        },
        Commands::Swap { action } => match action {
            SwapCommand::Add { size } => swap::add(&vbox, &cfg, size).await,
        },
        Commands::Version => version::version(&vbox).await,
    }
}

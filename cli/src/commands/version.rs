use anyhow::Context;
use colored::*;
use gokube_common::success;
use gokube_core::vbox::VBoxManage;
use gokube_core::vbox::manager::check_version;

use crate::terminal::print;

pub async fn version(vbox: &VBoxManage) -> anyhow::Result<()> {
    let installed = vbox.version().await.context("cannot read VirtualBox version")?;

    print::aligned_line("gokube", env!("CARGO_PKG_VERSION").normal(), 10);
    print::aligned_line("VirtualBox", installed.as_str().bright_green(), 10);
    print::aligned_line("VBoxManage", vbox.path().to_string().normal(), 10);

    check_version(&installed)?;
    success!("VirtualBox {installed} is supported");
    Ok(())
}

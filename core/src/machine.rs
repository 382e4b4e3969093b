//! # VM Power/State Controller
//!
//! [`VirtualMachine`] scopes every call to one registered VM. Snapshot and
//! swap disk operations live in the submodules and extend the same type.

pub mod snapshot;
pub mod swap;

use std::sync::OnceLock;

use gokube_common::error::VBoxError;
use gokube_common::vm::{VmProperties, VmState, parse_vm_properties};
use regex::Regex;
use tracing::debug;

use crate::vbox::VBoxManage;

pub use swap::{SWAP_DEVICE, SWAP_PORT, SwapOutcome, create_disk};

fn state_line() -> &'static Regex {
    static STATE_LINE: OnceLock<Regex> = OnceLock::new();
    STATE_LINE.get_or_init(|| Regex::new(r"(?m)^State:\s*(.*)$").expect("state line pattern"))
}

fn machine_not_found() -> &'static Regex {
    static MACHINE_NOT_FOUND: OnceLock<Regex> = OnceLock::new();
    MACHINE_NOT_FOUND.get_or_init(|| {
        Regex::new(r"Could not find a registered machine named '(.+)'")
            .expect("machine not found pattern")
    })
}

/// A VirtualBox VM addressed by name.
pub struct VirtualMachine<'a> {
    vbox: &'a VBoxManage,
    name: String,
}

impl<'a> VirtualMachine<'a> {
    pub fn new(vbox: &'a VBoxManage, name: impl Into<String>) -> Self {
        Self {
            vbox,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current power state, [`VmState::Absent`] when the VM is not
    /// registered or `showvminfo` prints no `State:` line.
    pub async fn state(&self) -> Result<VmState, VBoxError> {
        let out = match self.vbox.run_out(&["showvminfo", self.name.as_str()]).await {
            Ok(out) => out,
            Err(e) if e.stderr().is_some_and(|s| machine_not_found().is_match(s)) => {
                debug!("VM {} is not registered", self.name);
                return Ok(VmState::Absent);
            }
            Err(e) => return Err(e),
        };

        let state = state_line()
            .captures(&out)
            .and_then(|caps| caps.get(1))
            .map_or(VmState::Absent, |m| VmState::from_state_text(m.as_str()));
        debug!("VM {} is {state}", self.name);
        Ok(state)
    }

    /// True only when the VM exists and is running.
    pub async fn is_running(&self) -> Result<bool, VBoxError> {
        Ok(self.state().await?.is_running())
    }

    pub async fn pause(&self) -> Result<(), VBoxError> {
        self.control("pause").await
    }

    pub async fn resume(&self) -> Result<(), VBoxError> {
        self.control("resume").await
    }

    /// Changes persistent settings, e.g. `["--memory", "4096"]`.
    pub async fn update<S: AsRef<str>>(&self, settings: &[S]) -> Result<(), VBoxError> {
        let mut args = vec!["modifyvm".to_string(), self.name.clone()];
        args.extend(settings.iter().map(|s| s.as_ref().to_string()));
        self.vbox.run(&args).await?;
        Ok(())
    }

    /// Every setting reported by `showvminfo --machinereadable`.
    pub async fn properties(&self) -> Result<VmProperties, VBoxError> {
        let out = self
            .vbox
            .run_out(&["showvminfo", self.name.as_str(), "--machinereadable"])
            .await?;
        Ok(parse_vm_properties(&out))
    }

    async fn control(&self, action: &str) -> Result<(), VBoxError> {
        self.vbox.run(&["controlvm", self.name.as_str(), action]).await?;
        Ok(())
    }

    fn vbox(&self) -> &'a VBoxManage {
        self.vbox
    }
}

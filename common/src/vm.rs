//! Guest VM value types.

use std::collections::BTreeMap;
use std::fmt;

use crate::utils::output::{equal_line, quoted_equal_line};

/// Power state reported on the `State:` line of `VBoxManage showvminfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmState {
    Running,
    Paused,
    PoweredOff,
    Saved,
    Aborted,
    /// The VM is not registered, or its state line was missing.
    Absent,
    Other(String),
}

impl VmState {
    /// Reads the text captured after `State:`, e.g. `running (since 2024-05-02T08:11:31.000000000)`.
    pub fn from_state_text(text: &str) -> Self {
        let text = text.trim();
        if text.starts_with("running") {
            VmState::Running
        } else if text.starts_with("paused") {
            VmState::Paused
        } else if text.starts_with("powered off") {
            VmState::PoweredOff
        } else if text.starts_with("saved") {
            VmState::Saved
        } else if text.starts_with("aborted") {
            VmState::Aborted
        } else {
            VmState::Other(text.to_string())
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, VmState::Running)
    }
}

impl fmt::Display for VmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmState::Running => write!(f, "running"),
            VmState::Paused => write!(f, "paused"),
            VmState::PoweredOff => write!(f, "powered off"),
            VmState::Saved => write!(f, "saved"),
            VmState::Aborted => write!(f, "aborted"),
            VmState::Absent => write!(f, "absent"),
            VmState::Other(text) => write!(f, "{text}"),
        }
    }
}

/// Outcome of a delete that tolerates the target being gone already.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    NotFound,
}

/// `showvminfo --machinereadable` settings with surrounding quotes removed.
pub type VmProperties = BTreeMap<String, String>;

/// Parses `showvminfo --machinereadable` output.
///
/// Quoted keys (`"SATA-2-0"="..."`) are tried first, plain `key=value`
/// lines after. Later duplicates win.
pub fn parse_vm_properties(text: &str) -> VmProperties {
    text.lines()
        .filter_map(|line| {
            quoted_equal_line()
                .captures(line)
                .or_else(|| equal_line().captures(line))
        })
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .map(|(key, value)| (unquote(key).to_string(), unquote(value).to_string()))
        .collect()
}

fn unquote(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}

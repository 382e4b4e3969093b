//! Error taxonomy shared by every layer.
//!
//! Expected absences (no matching adapter, snapshot already gone, VM not
//! registered) are deliberately missing here: those are modelled as regular
//! return values by the operations that can observe them.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while driving `VBoxManage`.
#[derive(Debug, Error)]
pub enum VBoxError {
    #[error("VBoxManage not found. Make sure VirtualBox is installed and VBoxManage is in the path")]
    ToolNotFound,

    #[error("cannot spawn {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// Standard error carried an `error:` marker, whatever the exit code said.
    #[error("{command} failed:\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("{command} exited with status {}", describe_code(.code))]
    ExitStatus {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error(
        "VirtualBox {0:?} is not supported. gokube needs VirtualBox 4.3 or later, please upgrade at https://www.virtualbox.org"
    )]
    UnsupportedVersion(String),
}

impl VBoxError {
    /// Standard error captured from the failed invocation, if one ran.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            VBoxError::CommandFailed { stderr, .. } | VBoxError::ExitStatus { stderr, .. } => {
                Some(stderr)
            }
            _ => None,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

/// Failures while parsing a single field of a listing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid hardware address {0:?}")]
    HardwareAddress(String),
}

/// Failures of the host-only network directory, matcher and reconciler.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("not able to list host-only networks: {0}")]
    Listing(#[from] VBoxError),

    #[error("not able to list DHCP servers: {0}")]
    DhcpListing(#[source] VBoxError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(
        "VirtualBox is configured with multiple host-only adapters with the same name {0:?}. Please remove one"
    )]
    DuplicateName(String),

    #[error(
        "VirtualBox is configured with multiple host-only adapters with the same IP {0}. Please remove one"
    )]
    DuplicateIp(std::net::Ipv4Addr),

    #[error("invalid CIDR {0:?}")]
    InvalidCidr(String),

    #[error("host-only CIDR must be specified with a host address, not a network address")]
    NetworkAddrCidr,

    #[error("not able to read DHCP lease directory {path}: {source}")]
    LeaseDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not able to delete lease file {path} ({removed} already deleted): {source}")]
    LeaseRemoval {
        path: PathBuf,
        removed: usize,
        #[source]
        source: io::Error,
    },

    #[error("not able to remove host-only network {name}: {source}")]
    Removal {
        name: String,
        #[source]
        source: VBoxError,
    },
}

/// Failures of the two-step swap disk provisioning.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("cannot create swap disk: {0}")]
    Create(#[source] VBoxError),

    #[error("cannot attach swap disk to VM: {0}")]
    Attach(#[source] VBoxError),
}

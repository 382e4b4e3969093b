use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gokube_core::vbox::{CommandRunner, RawOutput, RetryPolicy, VBoxManage, VBoxManagePath};

/// Stands in for `VBoxManage`: answers from a queue and logs every call.
#[derive(Clone, Default)]
pub struct FakeVBox {
    script: Arc<Mutex<VecDeque<io::Result<RawOutput>>>>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl FakeVBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, code: i32, stdout: &str, stderr: &str) -> Self {
        self.script.lock().unwrap().push_back(Ok(RawOutput {
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }));
        self
    }

    pub fn then_ok(self, stdout: &str) -> Self {
        self.then(0, stdout, "")
    }

    pub fn then_missing_binary(self) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory")));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// An executor with the stock retry policy.
    pub fn manager(&self) -> VBoxManage {
        self.manager_with(RetryPolicy::default())
    }

    pub fn manager_with(&self, retry: RetryPolicy) -> VBoxManage {
        VBoxManage::with_runner(
            VBoxManagePath::from(PathBuf::from("VBoxManage")),
            Box::new(self.clone()),
        )
        .retry_policy(retry)
    }
}

#[async_trait]
impl CommandRunner for FakeVBox {
    async fn run(&self, _program: &Path, args: &[String]) -> io::Result<RawOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected VBoxManage call: {args:?}"))
    }
}

pub const OBJECT_NOT_READY: &str =
    "VBoxManage: error: The object is not ready\nVBoxManage: error: Details: code E_ACCESSDENIED (0x80070005)";

/// `list hostonlyifs` for one adapter on 192.168.99.1/24.
pub const VBOXNET0: &str = "\
Name:            vboxnet0
GUID:            786f6276-656e-4074-8000-0a0027000000
DHCP:            Disabled
IPAddress:       192.168.99.1
NetworkMask:     255.255.255.0
IPV6Address:
IPV6NetworkMaskPrefixLength: 0
HardwareAddress: 0a:00:27:00:00:00
MediumType:      Ethernet
Wireless:        No
Status:          Up
VBoxNetworkName: HostInterfaceNetworking-vboxnet0
";

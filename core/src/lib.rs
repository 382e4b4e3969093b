//! # gokube core
//!
//! Hypervisor control and host-network reconciliation for the minikube VM.
//!
//! * [`vbox`]: locating and invoking `VBoxManage`, with retries on transient locks.
//! * [`network`]: host-only adapter directory, CIDR matching, DHCP lease reset and purge.
//! * [`machine`]: power state, snapshots and swap disk of one named VM.
//!
//! Nothing here starts or stops the cluster itself; that is left to the
//! bootstrapper the CLI drives.

pub mod machine;
pub mod network;
pub mod vbox;

#[cfg(test)]
pub(crate) mod testing;

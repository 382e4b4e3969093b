//! Host-only network model.
//!
//! * [`adapter`]: adapter and DHCP server records parsed from `VBoxManage list`.
//! * [`cidr`]: the expected host-only range the guest VM lives in.

pub mod adapter;
pub mod cidr;

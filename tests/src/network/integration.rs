#![cfg(test)]
use std::fs;
use std::path::PathBuf;

use gokube_common::config::Config;
use gokube_common::error::NetworkError;
use gokube_core::network::{LeaseReset, list_host_only_networks, reset_host_only_network_leases};

use crate::support::{FakeVBox, VBOXNET0};

fn home_config(home: PathBuf) -> Config {
    Config::from_lookup(home, |_| None).unwrap()
}

/// A recreated VM must not inherit old DHCP bindings: every lease file of
/// the network serving the CIDR goes, everything else in the directory stays.
#[tokio::test]
async fn reset_leases_deletes_exactly_the_network_files() {
    let home = tempfile::tempdir().unwrap();
    let cfg = home_config(home.path().to_path_buf());
    let lease_dir = cfg.lease_dir();
    fs::create_dir_all(&lease_dir).unwrap();

    let doomed: Vec<PathBuf> = ["pid", "leases", "conf"]
        .iter()
        .map(|ext| lease_dir.join(format!("HostInterfaceNetworking-vboxnet0.{ext}")))
        .collect();
    for path in &doomed {
        fs::write(path, "lease").unwrap();
    }
    let unrelated = lease_dir.join("VirtualBox.xml");
    fs::write(&unrelated, "<VirtualBox/>").unwrap();

    let fake = FakeVBox::new().then_ok(VBOXNET0);
    let outcome = reset_host_only_network_leases(&fake.manager(), &cfg.host_only_cidr, &lease_dir)
        .await
        .unwrap();

    let LeaseReset::Reset { network_name, removed } = outcome else {
        panic!("no network matched {}", cfg.host_only_cidr);
    };
    assert_eq!(network_name, "HostInterfaceNetworking-vboxnet0");
    assert_eq!(removed.len(), 3);
    for path in &doomed {
        assert!(!path.exists(), "{} survived", path.display());
    }
    assert!(unrelated.exists());
    assert_eq!(fake.calls(), vec![vec!["list".to_string(), "hostonlyifs".to_string()]]);
}

#[tokio::test]
async fn network_address_cidr_never_reaches_vboxmanage() {
    let home = tempfile::tempdir().unwrap();
    let fake = FakeVBox::new();

    let err = reset_host_only_network_leases(&fake.manager(), "192.168.99.0/24", home.path())
        .await
        .unwrap_err();

    assert!(matches!(err, NetworkError::NetworkAddrCidr));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn freshly_created_adapter_with_buggy_netmask_still_matches() {
    let home = tempfile::tempdir().unwrap();
    let lease = home.path().join("HostInterfaceNetworking-vboxnet0-Dhcpd.leases");
    fs::write(&lease, "").unwrap();

    let listing = VBOXNET0.replace("255.255.255.0", "15.0.0.0");
    let fake = FakeVBox::new().then_ok(&listing);

    let outcome = reset_host_only_network_leases(&fake.manager(), "192.168.99.1/24", home.path())
        .await
        .unwrap();

    assert!(matches!(outcome, LeaseReset::Reset { .. }));
    assert!(!lease.exists());
}

#[tokio::test]
async fn duplicate_adapter_names_are_rejected() {
    let listing = format!("{VBOXNET0}\n{VBOXNET0}");
    let fake = FakeVBox::new().then_ok(&listing);

    let err = list_host_only_networks(&fake.manager()).await.unwrap_err();

    assert!(matches!(err, NetworkError::DuplicateName(name) if name == "HostInterfaceNetworking-vboxnet0"));
}

#[tokio::test]
async fn duplicate_adapter_ips_are_rejected() {
    let second = VBOXNET0.replace("vboxnet0", "vboxnet1");
    let listing = format!("{VBOXNET0}\n{second}");
    let fake = FakeVBox::new().then_ok(&listing);

    let err = list_host_only_networks(&fake.manager()).await.unwrap_err();

    assert!(matches!(err, NetworkError::DuplicateIp(ip) if ip.to_string() == "192.168.99.1"));
}

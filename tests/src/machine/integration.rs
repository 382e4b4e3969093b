#![cfg(test)]
use std::fs;

use gokube_common::config::Config;
use gokube_common::vm::Removal;
use gokube_core::machine::VirtualMachine;

use crate::support::FakeVBox;

#[tokio::test]
async fn deleting_a_missing_snapshot_is_not_an_error() {
    let fake = FakeVBox::new()
        .then(
            1,
            "",
            "VBoxManage: error: Could not find a snapshot named 'gokube'\nVBoxManage: error: Details: code VBOX_E_OBJECT_NOT_FOUND (0x80bb0001)",
        )
        .then(1, "", "VBoxManage: error: This machine does not have any snapshots");
    let vbox = fake.manager();
    let vm = VirtualMachine::new(&vbox, "minikube");

    assert_eq!(vm.delete_snapshot("gokube").await.unwrap(), Removal::NotFound);
    assert_eq!(vm.delete_snapshot("gokube").await.unwrap(), Removal::NotFound);
}

#[tokio::test]
async fn save_sequence_replaces_the_snapshot() {
    let fake = FakeVBox::new()
        .then_ok("Name: minikube\nState:           powered off (since 2024-05-02T08:11:31.000000000)\n")
        .then_ok("Deleting snapshot 'gokube' (6a1f4b4e-0000-4000-8000-000000000000)\n")
        .then_ok("Snapshot taken. UUID: 7b2e5c5f-0000-4000-8000-000000000000\n");
    let vbox = fake.manager();
    let vm = VirtualMachine::new(&vbox, "minikube");

    assert!(!vm.is_running().await.unwrap());
    assert_eq!(vm.delete_snapshot("gokube").await.unwrap(), Removal::Removed);
    vm.take_snapshot("gokube").await.unwrap();

    let calls = fake.calls();
    assert_eq!(calls[1], ["snapshot", "minikube", "delete", "gokube"]);
    assert_eq!(calls[2], ["snapshot", "minikube", "take", "gokube"]);
}

#[tokio::test]
async fn vm_without_state_line_is_not_running() {
    let fake = FakeVBox::new().then_ok("Name:            minikube\nGroups:          /\n");
    let vbox = fake.manager();

    let running = VirtualMachine::new(&vbox, "minikube").is_running().await;

    assert!(!running.unwrap());
}

#[tokio::test]
async fn swap_provisioning_is_idempotent() {
    let home = tempfile::tempdir().unwrap();
    let cfg = Config::from_lookup(home.path().to_path_buf(), |key| {
        (key == "MINIKUBE_SWAP").then(|| "1024".to_string())
    })
    .unwrap();
    let path = cfg.swap_disk_path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let attached = format!("\"SATA-2-0\"=\"{}\"\n", path.display());

    let first = FakeVBox::new().then_ok("").then_ok("name=\"minikube\"\n").then_ok("");
    let vbox = first.manager();
    let outcome = VirtualMachine::new(&vbox, "minikube")
        .add_swap_disk(cfg.swap_mb, &path)
        .await
        .unwrap();
    assert!(outcome.created && outcome.attached);
    assert!(first.calls()[0].contains(&"--size=1024".to_string()));

    // VBoxManage would have created the image on the first run.
    fs::write(&path, "").unwrap();

    let second = FakeVBox::new().then_ok(&attached);
    let vbox = second.manager();
    let outcome = VirtualMachine::new(&vbox, "minikube")
        .add_swap_disk(cfg.swap_mb, &path)
        .await
        .unwrap();
    assert!(!outcome.created && !outcome.attached);
    assert_eq!(second.calls().len(), 1);
}

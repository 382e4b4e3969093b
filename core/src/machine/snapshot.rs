//! Named snapshots of a [`VirtualMachine`].

use std::sync::OnceLock;

use gokube_common::error::VBoxError;
use gokube_common::vm::Removal;
use regex::Regex;
use tracing::debug;

use super::VirtualMachine;

fn snapshot_not_found() -> &'static Regex {
    static SNAPSHOT_NOT_FOUND: OnceLock<Regex> = OnceLock::new();
    SNAPSHOT_NOT_FOUND.get_or_init(|| {
        Regex::new(r"Could not find a snapshot named '(.+)'").expect("snapshot not found pattern")
    })
}

fn no_snapshots() -> &'static Regex {
    static NO_SNAPSHOTS: OnceLock<Regex> = OnceLock::new();
    NO_SNAPSHOTS.get_or_init(|| {
        Regex::new(r"This machine does not have any snapshots").expect("no snapshots pattern")
    })
}

impl VirtualMachine<'_> {
    pub async fn take_snapshot(&self, name: &str) -> Result<(), VBoxError> {
        self.snapshot("take", name).await
    }

    pub async fn restore_snapshot(&self, name: &str) -> Result<(), VBoxError> {
        self.snapshot("restore", name).await
    }

    /// Deletes `name`, reporting [`Removal::NotFound`] when there was no
    /// such snapshot to begin with.
    pub async fn delete_snapshot(&self, name: &str) -> Result<Removal, VBoxError> {
        match self.snapshot("delete", name).await {
            Ok(()) => Ok(Removal::Removed),
            Err(e) if e.stderr().is_some_and(is_missing_snapshot) => {
                debug!("Snapshot {name} of {} does not exist", self.name());
                Ok(Removal::NotFound)
            }
            Err(e) => Err(e),
        }
    }

    async fn snapshot(&self, action: &str, name: &str) -> Result<(), VBoxError> {
        self.vbox()
            .run(&["snapshot", self.name(), action, name])
            .await?;
        Ok(())
    }
}

fn is_missing_snapshot(stderr: &str) -> bool {
    snapshot_not_found().is_match(stderr) || no_snapshots().is_match(stderr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedRunner, manager};

    #[tokio::test]
    async fn take_and_restore_address_the_named_snapshot() {
        let runner = ScriptedRunner::new().ok("").ok("");
        let vbox = manager(&runner);
        let vm = VirtualMachine::new(&vbox, "minikube");

        vm.take_snapshot("gokube").await.unwrap();
        vm.restore_snapshot("gokube").await.unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0], ["snapshot", "minikube", "take", "gokube"]);
        assert_eq!(calls[1], ["snapshot", "minikube", "restore", "gokube"]);
    }

    #[tokio::test]
    async fn delete_reports_removed() {
        let runner = ScriptedRunner::new().ok("0%...10%...100%\n");
        let vbox = manager(&runner);
        let vm = VirtualMachine::new(&vbox, "minikube");

        assert_eq!(vm.delete_snapshot("gokube").await.unwrap(), Removal::Removed);
    }

    #[tokio::test]
    async fn delete_of_unknown_snapshot_is_not_found() {
        let runner = ScriptedRunner::new().fail(
            1,
            "VBoxManage: error: Could not find a snapshot named 'gokube'\nVBoxManage: error: Details: code VBOX_E_OBJECT_NOT_FOUND (0x80bb0001)",
        );
        let vbox = manager(&runner);
        let vm = VirtualMachine::new(&vbox, "minikube");

        assert_eq!(vm.delete_snapshot("gokube").await.unwrap(), Removal::NotFound);
    }

    #[tokio::test]
    async fn delete_without_any_snapshot_is_not_found() {
        let runner = ScriptedRunner::new().fail(
            1,
            "VBoxManage: error: This machine does not have any snapshots",
        );
        let vbox = manager(&runner);
        let vm = VirtualMachine::new(&vbox, "minikube");

        assert_eq!(vm.delete_snapshot("gokube").await.unwrap(), Removal::NotFound);
    }

    #[tokio::test]
    async fn other_delete_failures_propagate() {
        let runner = ScriptedRunner::new().fail(
            1,
            "VBoxManage: error: Snapshot operation failed. Error message: VERR_FILE_LOCK_VIOLATION",
        );
        let vbox = manager(&runner);
        let vm = VirtualMachine::new(&vbox, "minikube");

        assert!(vm.delete_snapshot("gokube").await.is_err());
    }

    #[tokio::test]
    async fn take_failure_propagates_as_is() {
        let runner = ScriptedRunner::new().fail(1, "VBoxManage: error: Machine 'minikube' is not registered");
        let vbox = manager(&runner);
        let vm = VirtualMachine::new(&vbox, "minikube");

        let err = vm.take_snapshot("gokube").await.unwrap_err();
        assert!(err.to_string().contains("snapshot minikube take gokube"));
    }
}

#![cfg(test)]
use std::time::{Duration, Instant};

use gokube_common::error::VBoxError;
use gokube_core::vbox::RetryPolicy;
use gokube_core::vbox::manager::check_version;

use crate::support::{FakeVBox, OBJECT_NOT_READY};

/// Four locked attempts then success: the fifth and last attempt wins and
/// every failure was followed by the 100ms pause.
#[tokio::test]
async fn object_not_ready_recovers_on_last_attempt() {
    let fake = FakeVBox::new()
        .then(1, "", OBJECT_NOT_READY)
        .then(1, "", OBJECT_NOT_READY)
        .then(1, "", OBJECT_NOT_READY)
        .then(1, "", OBJECT_NOT_READY)
        .then_ok("");
    let vbox = fake.manager();

    let started = Instant::now();
    let result = vbox.run(&["controlvm", "minikube", "resume"]).await;

    assert!(result.is_ok(), "resume failed: {:?}", result.err());
    assert_eq!(fake.calls().len(), 5);
    assert!(
        started.elapsed() >= Duration::from_millis(400),
        "retries did not wait: {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn exhausted_retries_surface_the_lock_error() {
    let mut fake = FakeVBox::new();
    for _ in 0..5 {
        fake = fake.then(1, "", OBJECT_NOT_READY);
    }
    let vbox = fake.manager_with(RetryPolicy {
        attempts: 5,
        delay: Duration::from_millis(1),
    });

    let err = vbox
        .run(&["snapshot", "minikube", "take", "gokube"])
        .await
        .unwrap_err();

    assert_eq!(fake.calls().len(), 5);
    assert!(err.to_string().contains("The object is not ready"));
}

#[tokio::test]
async fn error_marker_with_zero_exit_is_a_failure() {
    let fake = FakeVBox::new().then(
        0,
        "",
        "VBoxManage: error: Could not find a registered machine named 'minikube'",
    );
    let vbox = fake.manager();

    let err = vbox.run(&["showvminfo", "minikube"]).await.unwrap_err();

    match err {
        VBoxError::CommandFailed { command, stderr } => {
            assert_eq!(command, "VBoxManage showvminfo minikube");
            assert!(stderr.contains("Could not find a registered machine"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_binary_is_tool_not_found() {
    let fake = FakeVBox::new().then_missing_binary();
    let vbox = fake.manager();

    let err = vbox.run(&["list", "vms"]).await.unwrap_err();

    assert!(matches!(err, VBoxError::ToolNotFound));
    assert!(err.to_string().contains("VBoxManage not found"));
}

#[tokio::test]
async fn installed_version_is_checked() {
    let fake = FakeVBox::new().then_ok("4.2.36r101876\n");
    let vbox = fake.manager();

    let installed = vbox.version().await.unwrap();
    let err = check_version(&installed).unwrap_err();

    assert!(matches!(err, VBoxError::UnsupportedVersion(v) if v == "4.2.36r101876"));
}

//! Scripted stand-in for `VBoxManage` used by unit tests.

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::vbox::{CommandRunner, RawOutput, RetryPolicy, VBoxManage, VBoxManagePath};

/// Replays queued responses in order and records every argument list.
///
/// Clones share the queue and the call log, so a test keeps one handle
/// while the executor owns another.
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    responses: Arc<Mutex<VecDeque<io::Result<RawOutput>>>>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, raw: RawOutput) -> Self {
        self.responses.lock().unwrap().push_back(Ok(raw));
        self
    }

    pub fn ok(self, stdout: &str) -> Self {
        self.respond(RawOutput {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    pub fn fail(self, code: i32, stderr: &str) -> Self {
        self.respond(RawOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        })
    }

    pub fn not_ready(self) -> Self {
        self.fail(
            1,
            "VBoxManage: error: The object is not ready\nVBoxManage: error: Details: code E_ACCESSDENIED",
        )
    }

    pub fn spawn_error(self, kind: io::ErrorKind) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(io::Error::new(kind, "scripted spawn failure")));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, _program: &Path, args: &[String]) -> io::Result<RawOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for {args:?}"))
    }
}

/// An executor over `runner` with a short retry delay.
pub fn manager(runner: &ScriptedRunner) -> VBoxManage {
    VBoxManage::with_runner(
        VBoxManagePath::from(PathBuf::from("/usr/bin/VBoxManage")),
        Box::new(runner.clone()),
    )
    .retry_policy(RetryPolicy {
        attempts: 5,
        delay: Duration::from_millis(100),
    })
}

//! The subprocess boundary.
//!
//! [`CommandRunner`] is the only place gokube touches the OS process table,
//! which keeps the executor's retry and classification logic testable with a
//! scripted runner.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

/// What a finished process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RawOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a program to completion and captures its output.
///
/// An `Err` means the process could not be started at all; a process that
/// ran and failed is still an `Ok` carrying its exit code.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[String]) -> io::Result<RawOutput>;
}

/// Spawns real processes through tokio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &Path, args: &[String]) -> io::Result<RawOutput> {
        let output = Command::new(program).args(args).output().await?;

        Ok(RawOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

//! # Command Executor
//!
//! Runs `VBoxManage` and turns its loosely defined failure reporting into
//! [`VBoxError`]s:
//!
//! * a spawn that cannot find the program becomes [`VBoxError::ToolNotFound`];
//! * `error:` anywhere in stderr is a failure even with a zero exit code,
//!   since `VBoxManage` does not always set one;
//! * `The object is not ready` in stderr is a transient session lock and the
//!   whole invocation is retried after a short pause.

use std::io;
use std::time::Duration;

use gokube_common::error::VBoxError;
use tracing::debug;

use super::discovery::VBoxManagePath;
use super::runner::{CommandRunner, ProcessRunner};

const OBJECT_NOT_READY: &str = "The object is not ready";
const ERROR_MARKER: &str = "error:";

/// Bounded retry budget for the transient lock condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, the first one included.
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_millis(100),
        }
    }
}

/// Captured output of a successful invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Handle on the `VBoxManage` executable.
pub struct VBoxManage {
    path: VBoxManagePath,
    runner: Box<dyn CommandRunner>,
    retry: RetryPolicy,
}

impl VBoxManage {
    /// Spawns real processes at `path`.
    pub fn new(path: VBoxManagePath) -> Self {
        Self::with_runner(path, Box::new(ProcessRunner))
    }

    pub fn with_runner(path: VBoxManagePath, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            path,
            runner,
            retry: RetryPolicy::default(),
        }
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn path(&self) -> &VBoxManagePath {
        &self.path
    }

    /// Runs `VBoxManage <args>` and returns stdout and stderr.
    pub async fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<CommandOutput, VBoxError> {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
        let command = format!("{} {}", self.path, args.join(" "));
        let mut remaining = self.retry.attempts;

        loop {
            debug!("Running {command}");

            let raw = match self.runner.run(self.path.as_path(), &args).await {
                Ok(raw) => raw,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(VBoxError::ToolNotFound);
                }
                Err(source) => return Err(VBoxError::Spawn { command, source }),
            };

            if remaining > 1 && raw.stderr.contains(OBJECT_NOT_READY) {
                remaining -= 1;
                debug!(
                    "{command} hit a locked object, retrying in {:?} ({remaining} attempts left)",
                    self.retry.delay
                );
                tokio::time::sleep(self.retry.delay).await;
                continue;
            }

            if raw.stderr.contains(ERROR_MARKER) {
                return Err(VBoxError::CommandFailed {
                    command,
                    stderr: raw.stderr,
                });
            }

            if !raw.success() {
                return Err(VBoxError::ExitStatus {
                    command,
                    code: raw.code,
                    stderr: raw.stderr,
                });
            }

            return Ok(CommandOutput {
                stdout: raw.stdout,
                stderr: raw.stderr,
            });
        }
    }

    /// Like [`VBoxManage::run`], keeping stdout only.
    pub async fn run_out<S: AsRef<str>>(&self, args: &[S]) -> Result<String, VBoxError> {
        self.run(args).await.map(|out| out.stdout)
    }

    /// Installed VirtualBox version, e.g. `7.0.14r161095`.
    pub async fn version(&self) -> Result<String, VBoxError> {
        let out = self.run_out(&["--version"]).await?;
        Ok(out.trim().to_string())
    }
}

/// Rejects VirtualBox releases older than 4.3.
pub fn check_version(version: &str) -> Result<(), VBoxError> {
    match parse_version(version) {
        Some((major, minor)) if major > 4 || (major == 4 && minor > 2) => Ok(()),
        _ => Err(VBoxError::UnsupportedVersion(version.to_string())),
    }
}

fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

//! Everything needed to talk to `VBoxManage`.
//!
//! * [`discovery`]: finds the executable once at startup.
//! * [`runner`]: the subprocess port and its tokio implementation.
//! * [`manager`]: retrying executor and failure classification.

pub mod discovery;
pub mod manager;
pub mod runner;

pub use discovery::VBoxManagePath;
pub use manager::{CommandOutput, RetryPolicy, VBoxManage};
pub use runner::{CommandRunner, ProcessRunner, RawOutput};

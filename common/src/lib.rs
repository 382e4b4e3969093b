//! Shared building blocks for gokube.
//!
//! Everything in here is free of subprocesses: the records parsed out of
//! `VBoxManage` output, the error types every layer returns, the runtime
//! configuration and the status macros the CLI formatter understands.

pub mod config;
pub mod error;
pub mod network;
pub mod utils;
pub mod vm;

#[doc(hidden)]
pub use tracing as __tracing;

/// Progress message shown to the user with the neutral `[*]` marker.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(status = "info", $($arg)*)
    };
}

/// Completion message shown with the green `[+]` marker.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(status = "success", $($arg)*)
    };
}

/// Degraded-but-continuing message shown with the yellow `[!]` marker.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!(status = "warn", $($arg)*)
    };
}

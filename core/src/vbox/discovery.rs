//! Locates the `VBoxManage` executable.
//!
//! Lookup order:
//! 1. `$VBOX_INSTALL_PATH`
//! 2. `$VBOX_MSI_INSTALL_PATH`
//! 3. the default Windows installation directory
//! 4. the `InstallDir` value under `HKLM\SOFTWARE\Oracle\VirtualBox` (Windows only)
//! 5. every entry of `$PATH`
//!
//! When all of them miss, the bare executable name is kept so the spawn
//! itself reports the tool as missing.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

const VBOX_MANAGE: &str = "VBoxManage";
const DEFAULT_WINDOWS_INSTALL_DIR: &str = r"C:\Program Files\Oracle\VirtualBox";
#[cfg_attr(not(windows), allow(dead_code))]
const REGISTRY_KEY: &str = r"HKLM\SOFTWARE\Oracle\VirtualBox";

/// Resolved location of `VBoxManage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VBoxManagePath(PathBuf);

impl VBoxManagePath {
    /// Searches the real environment and, on Windows, the registry.
    pub fn detect() -> Self {
        Self::detect_with(|key| env::var(key).ok(), registry_install_dir)
    }

    /// Searches with an explicit variable source and registry reader.
    pub fn detect_with(
        lookup: impl Fn(&str) -> Option<String>,
        registry: impl Fn() -> Option<PathBuf>,
    ) -> Self {
        let in_dir = |dir: &Path| look_path(&dir.join(VBOX_MANAGE));

        let found = ["VBOX_INSTALL_PATH", "VBOX_MSI_INSTALL_PATH"]
            .into_iter()
            .filter_map(|key| lookup(key).filter(|v| !v.is_empty()))
            .find_map(|dir| in_dir(Path::new(&dir)))
            .or_else(|| {
                cfg!(windows)
                    .then(|| in_dir(Path::new(DEFAULT_WINDOWS_INSTALL_DIR)))
                    .flatten()
            })
            .or_else(|| registry().and_then(|dir| in_dir(&dir)))
            .or_else(|| {
                lookup("PATH").and_then(|paths| {
                    env::split_paths(&paths).find_map(|dir| in_dir(&dir))
                })
            });

        match found {
            Some(path) => {
                debug!("Using {}", path.display());
                Self(path)
            }
            None => {
                debug!("{VBOX_MANAGE} not found in any known location, relying on the OS lookup");
                Self(PathBuf::from(VBOX_MANAGE))
            }
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for VBoxManagePath {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl fmt::Display for VBoxManagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Returns `candidate` (with `.exe` on Windows) if it is an executable file.
fn look_path(candidate: &Path) -> Option<PathBuf> {
    let candidate = if cfg!(windows) && candidate.extension().is_none() {
        candidate.with_extension("exe")
    } else {
        candidate.to_path_buf()
    };

    is_executable(&candidate).then_some(candidate)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(windows)]
fn registry_install_dir() -> Option<PathBuf> {
    let output = std::process::Command::new("reg")
        .args(["query", REGISTRY_KEY, "/v", "InstallDir"])
        .output()
        .ok()?;

    if !output.status.success() {
        debug!("Can't find VirtualBox registry entries under {REGISTRY_KEY}");
        return None;
    }

    parse_reg_query(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(not(windows))]
fn registry_install_dir() -> Option<PathBuf> {
    None
}

/// Extracts the `InstallDir` value from `reg query` output.
#[cfg_attr(not(windows), allow(dead_code))]
fn parse_reg_query(text: &str) -> Option<PathBuf> {
    text.lines()
        .filter(|line| line.trim_start().starts_with("InstallDir"))
        .find_map(|line| line.split_once("REG_SZ"))
        .map(|(_, value)| PathBuf::from(value.trim()))
        .filter(|dir| !dir.as_os_str().is_empty())
}

//! # Structured Output Parser
//!
//! `VBoxManage` answers in line-oriented `key: value` or `key=value` text.
//! [`parse_key_values`] walks such text line by line and hands every
//! matching pair to a callback, which is where the record-specific logic
//! lives (adapters, DHCP servers, VM properties).

use std::sync::OnceLock;

use regex::Regex;

/// `Name:            vboxnet0`
pub fn colon_line() -> &'static Regex {
    static COLON_LINE: OnceLock<Regex> = OnceLock::new();
    COLON_LINE.get_or_init(|| Regex::new(r"(.+):\s+(.*)").expect("colon line pattern"))
}

/// `memory=4096`
pub fn equal_line() -> &'static Regex {
    static EQUAL_LINE: OnceLock<Regex> = OnceLock::new();
    EQUAL_LINE.get_or_init(|| Regex::new(r"(.+)=(.*)").expect("equal line pattern"))
}

/// `"SATA-2-0"="/home/me/.minikube/machines/minikube/swapdisk.vdi"`
pub fn quoted_equal_line() -> &'static Regex {
    static QUOTED_EQUAL_LINE: OnceLock<Regex> = OnceLock::new();
    QUOTED_EQUAL_LINE
        .get_or_init(|| Regex::new(r#""(.+)"="(.*)""#).expect("quoted equal line pattern"))
}

/// Scans `text` and calls `on_match(key, value)` for every line matching `shape`.
///
/// `shape` must have two capture groups. Blank lines and lines that do not
/// match are skipped. The first error returned by the callback stops the scan
/// and is propagated as is.
pub fn parse_key_values<E>(
    text: &str,
    shape: &Regex,
    mut on_match: impl FnMut(&str, &str) -> Result<(), E>,
) -> Result<(), E> {
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }

        let Some(captures) = shape.captures(line) else {
            continue;
        };

        let (Some(key), Some(value)) = (captures.get(1), captures.get(2)) else {
            continue;
        };

        on_match(key.as_str(), value.as_str())?;
    }

    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

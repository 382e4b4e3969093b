use colored::*;
use tracing::info;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

#[macro_export]
macro_rules! gprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

/// Writes `msg` as is, without a status symbol.
pub fn print(msg: &str) {
    info!(target: "gokube::print", raw_msg = msg);
}

/// `──⟦ TITLE ⟧──`, centred on [`TOTAL_WIDTH`]. Nothing in quiet mode.
pub fn header(title: &str, quiet: bool) {
    if !quiet {
        print(&header_line(title));
    }
}

fn header_line(title: &str) -> String {
    let title = format!("⟦ {} ⟧", title.to_uppercase());
    let fill = TOTAL_WIDTH.saturating_sub(title.chars().count());
    let (left, right) = (fill / 2, fill - fill / 2);

    format!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        title.bright_green(),
        "─".repeat(right).bright_black()
    )
}

/// `> key.......: value`, dotted out to `width`.
pub fn aligned_line(key: &str, value: ColoredString, width: usize) {
    let dots = ".".repeat((width + 1).saturating_sub(key.chars().count()));
    print(&format!(
        "{} {}{} {}",
        ">".color(colors::SEPARATOR),
        key.color(colors::PRIMARY),
        format!("{dots}:").color(colors::SEPARATOR),
        value
    ));
}

pub fn tree_head(idx: usize, name: &str) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));
}

pub fn as_tree_one_level(details: Vec<(String, ColoredString)>) {
    let key_width = details
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let last = details.len().saturating_sub(1);
    for (i, (key, value)) in details.into_iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        let dots = ".".repeat(key_width - key.chars().count());
        print(&format!(
            " {} {}{} {}",
            branch.bright_black(),
            key.color(colors::TEXT_DEFAULT),
            format!("{dots}:").color(colors::SEPARATOR),
            value
        ));
    }
}

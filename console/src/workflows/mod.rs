//! Operator workflow library
//!
//! Each workflow maps a CLI verb to a fixed sequence of remote commands
//! plus a rendering step. Scripted workflows build their report as a
//! string so tests can assert on it; the interactive shell attach and
//! the deploy confirmation are the only paths that talk to the terminal
//! directly.

pub mod backup;
pub mod containers;
pub mod databases;
pub mod deploy;
pub mod health;
pub mod logs;
pub mod monitor;
pub mod optimize;
pub mod quick;
pub mod restart;
pub mod services;
pub mod shell;
pub mod status;

use colored::Colorize;

const BANNER_WIDTH: usize = 50;

/// Top banner for a workflow report.
pub(crate) fn banner(title: &str) -> String {
    let bar = "=".repeat(BANNER_WIDTH);
    format!("{}\n{}\n{}\n", bar, title.bold(), bar)
}

/// Sub-section header inside a report.
pub(crate) fn section(title: &str) -> String {
    format!("=== {} ===", title)
}

/// Degraded-line marker: the subsystem was queried but gave nothing.
pub(crate) fn unavailable(what: &str) -> String {
    format!("{} {}: unavailable", "✗".red(), what)
}

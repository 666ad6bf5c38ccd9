//! Terminal output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, passed steps
//! - Red: errors, failed steps
//! - Yellow: warnings
//! - Cyan: paths, commands, hints
//! - Dimmed: secondary info, skipped steps

use console::{style, StyledObject};
use std::fmt::Display;

const RULE_WIDTH: usize = 56;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint(text: impl Display, f: impl FnOnce(StyledObject<String>) -> StyledObject<String>) -> String {
    let text = text.to_string();
    if colors_enabled() {
        f(style(text)).to_string()
    } else {
        text
    }
}

/// Print a success message with checkmark.
///
/// Example: `✓ wrote .vaultform.toml`
pub fn success(msg: &str) {
    println!("{} {}", paint("✓", |s| s.green()), msg);
}

/// Print an error message to stderr.
///
/// Example: `✗ authentication failed: HTTP 403`
pub fn error(msg: &str) {
    eprintln!("{} {}", paint("✗", |s| s.red()), msg);
}

/// Print a warning message.
pub fn warn(msg: &str) {
    println!("{} {}", paint("⚠", |s| s.yellow()), msg);
}

/// Print a hint message.
///
/// Example: `→ export VAULT_ADDR=...`
pub fn hint(msg: &str) {
    println!("{} {}", paint("→", |s| s.cyan()), paint(msg, |s| s.cyan()));
}

/// Print a bold header.
pub fn header(title: &str) {
    println!("{}", paint(title, |s| s.bold()));
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  address      https://vault.example.com`
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        paint(format!("{:<12}", label), |s| s.dim()),
        paint(value, |s| s.bold())
    );
}

/// Print a horizontal rule separator.
pub fn rule() {
    println!("{}", paint("─".repeat(RULE_WIDTH), |s| s.dim()));
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    println!("{}", paint(msg, |s| s.dim()));
}

/// Print an empty line.
pub fn blank() {
    println!();
}

/// Format a path in cyan.
pub fn path(p: impl Display) -> String {
    paint(p, |s| s.cyan())
}

/// Format a command in green.
pub fn cmd(c: &str) -> String {
    paint(c, |s| s.green())
}

/// Format a passing marker.
pub fn ok(text: &str) -> String {
    paint(text, |s| s.green())
}

/// Format a failing marker.
pub fn fail(text: &str) -> String {
    paint(text, |s| s.red())
}

/// Format a skipped/neutral marker.
pub fn skip(text: &str) -> String {
    paint(text, |s| s.dim())
}

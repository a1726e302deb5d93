//! Terminal output for CLI handlers.
//!
//! Human mode prints colored, indented lines to stdout. `--json` mode turns
//! every call into one `{"type", "payload"}` object per line, and commands
//! with a structured result print that result with [`json_output`].
//! `--quiet` drops everything except warnings.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::{const_rwlock, RwLock};
use serde_json::{json, Value};
use tabled::{Table, Tabled};

/// Output mode selected by the global CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static MODE: RwLock<OutputConfig> = const_rwlock(OutputConfig {
    json: false,
    quiet: false,
});

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    *MODE.write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    MODE.read().json
}

/// Route one message: a JSON line in json mode, otherwise `human` unless
/// quiet mode hides it.
fn emit(kind: &str, payload: Value, always: bool, human: impl FnOnce()) {
    let mode = *MODE.read();
    if mode.json {
        println!("{}", json!({ "type": kind, "payload": payload }));
    } else if always || !mode.quiet {
        human();
    }
}

/// Print a section header.
pub fn section(title: &str) {
    emit("section", json!({ "title": title }), false, || {
        println!();
        println!("{}", title.bold());
    });
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        json!({ "label": label, "value": &value }),
        false,
        || println!("  {:<16} {}", label.dimmed(), value),
    );
}

pub fn success(message: &str) {
    emit("success", json!({ "message": message }), false, || {
        println!("  {} {}", "✓".green(), message);
    });
}

/// Print a warning line. Shown even in quiet mode.
pub fn warning(message: &str) {
    emit("warning", json!({ "message": message }), true, || {
        println!("  {} {}", "⚠".yellow(), message);
    });
}

pub fn note(message: &str) {
    emit("note", json!({ "message": message }), false, || {
        println!("  {}", message.dimmed());
    });
}

/// Print rows as an indented table. Nothing is printed in json mode; the
/// command emits its own structured result instead.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    let mode = *MODE.read();
    if mode.json || mode.quiet {
        return;
    }

    for line in Table::new(rows).to_string().lines() {
        println!("  {line}");
    }
}

/// Print a command's structured result as a single JSON line.
pub fn json_output(value: Value) {
    println!("{value}");
}

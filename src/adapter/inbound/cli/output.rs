//! Terminal rendering for coinlens commands.
//!
//! Every printed line goes through this module so the `--json` and `--quiet`
//! flags behave the same for every command. In JSON mode status lines become
//! `{"type": ..., "payload": ...}` objects on stdout and the query result
//! itself is written once through [`json_output`]. Prices and percent changes
//! are formatted here too, so tables and fields agree on precision.

use std::fmt::Display;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parking_lot::{const_rwlock, RwLock};
use serde_json::{json, Value};

/// Output flags taken from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit JSON lines instead of text.
    pub json: bool,
    /// Print results only, no status chatter.
    pub quiet: bool,
    /// Number of `-v` flags.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }

    /// JSON wins over quiet: scripts always get their status objects.
    const fn mode(self) -> Mode {
        if self.json {
            Mode::Json
        } else if self.quiet {
            Mode::Quiet
        } else {
            Mode::Text
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Text,
    Quiet,
    Json,
}

static OUTPUT: RwLock<OutputConfig> = const_rwlock(OutputConfig::new(false, false, 0));

fn current() -> OutputConfig {
    *OUTPUT.read()
}

/// Install the flags parsed from the command line.
pub fn configure(config: OutputConfig) {
    *OUTPUT.write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

#[must_use]
pub fn is_quiet() -> bool {
    current().quiet
}

#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

/// Route one status line: a JSON object, nothing in quiet mode, or `text`.
fn status(kind: &str, payload: Value, text: impl FnOnce()) {
    match current().mode() {
        Mode::Json => println!("{}", json!({ "type": kind, "payload": payload })),
        Mode::Quiet => {}
        Mode::Text => text(),
    }
}

/// Banner shown above listings.
pub fn header(version: &str) {
    status(
        "header",
        json!({ "app": env!("CARGO_PKG_NAME"), "version": version }),
        || println!("{} {}\n", "coinlens".bold(), version.dimmed()),
    );
}

/// Section title, preceded by a blank line.
pub fn section(title: &str) {
    status("section", json!({ "title": title }), || {
        println!("\n{}", title.bold());
    });
}

/// `label  value` pair, labels padded to one column.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    status(
        "field",
        json!({ "label": label, "value": value }),
        || println!("  {:<12} {value}", label.dimmed()),
    );
}

pub fn success(message: &str) {
    status("success", json!({ "message": message }), || {
        println!("  {} {message}", "✓".green());
    });
}

pub fn note(message: &str) {
    status("note", json!({ "message": message }), || {
        println!("  {}", message.dimmed());
    });
}

/// Suggestion for what to run next.
pub fn hint(message: &str) {
    status("hint", json!({ "message": message }), || {
        println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
    });
}

/// Pre-rendered block such as a table, indented by two spaces.
pub fn lines(content: &str) {
    status("lines", json!({ "content": content }), || {
        for line in content.lines() {
            println!("  {line}");
        }
    });
}

/// Warnings are printed even in quiet mode.
pub fn warning(message: &str) {
    if is_json() {
        println!("{}", json!({ "type": "warning", "payload": { "message": message } }));
    } else {
        println!("  {} {message}", "⚠".yellow());
    }
}

/// Errors go to stderr in every mode.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {message}", "×".red());
    }
}

/// Write a command's result as a single JSON line.
pub fn json_output(value: Value) {
    println!("{value}");
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner shown while a request is in flight. Hidden unless printing text.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = if current().mode() == Mode::Text {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(SPINNER_FRAMES)
            .template("  {spinner:.cyan} {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    } else {
        ProgressBar::hidden()
    };
    pb.set_message(message.to_string());
    pb
}

/// Stop `pb` and leave a failure mark with `message`.
pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    match current().mode() {
        Mode::Json => {
            println!("{}", json!({ "type": "spinner_fail", "payload": { "message": message } }));
            pb.finish_and_clear();
        }
        Mode::Quiet => pb.finish_and_clear(),
        Mode::Text => pb.finish_with_message(format!("{} {message}", "×".red())),
    }
}

/// Colors are dropped in JSON mode so values stay machine-readable.
fn paint(value: impl Display, color: fn(&String) -> String) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        color(&value)
    }
}

pub fn positive(value: impl Display) -> String {
    paint(value, |v| v.green().to_string())
}

pub fn negative(value: impl Display) -> String {
    paint(value, |v| v.red().to_string())
}

pub fn highlight(value: impl Display) -> String {
    paint(value, |v| v.cyan().to_string())
}

pub fn muted(value: impl Display) -> String {
    paint(value, |v| v.dimmed().to_string())
}

/// Signed percent change; `-` when unknown.
pub fn change(percent: Option<f64>) -> String {
    match percent {
        Some(value) if value >= 0.0 => positive(format!("+{value:.2}%")),
        Some(value) => negative(format!("{value:.2}%")),
        None => muted("-"),
    }
}

/// Two decimals for prices of one unit or more, six below that.
#[must_use]
pub fn price(value: f64) -> String {
    if value.abs() >= 1.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_precision_depends_on_magnitude() {
        assert_eq!(price(64_250.5), "64250.50");
        assert_eq!(price(0.000_123_4), "0.000123");
    }

    #[test]
    fn json_takes_precedence_over_quiet() {
        assert_eq!(OutputConfig::new(false, true, 0).mode(), Mode::Quiet);
        assert_eq!(OutputConfig::new(true, true, 0).mode(), Mode::Json);
        assert_eq!(OutputConfig::new(false, false, 2).mode(), Mode::Text);
    }
}

//! # Output Configuration
//!
//! Controls whether human-facing CLI output (the `validate` report, the
//! `graph` header) uses emoji or plain bracketed markers. JSON output is
//! never decorated.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag, wins over the environment
//! - `NO_COLOR` - disables decoration when set, even if empty
//!   (https://no-color.org/)
//! - `CLICOLOR=0` - disables decoration
//! - `CLICOLOR_FORCE=1` - forces decoration on a non-TTY
//! - `TERM=dumb` - disables decoration
//!
//! ## Usage
//!
//! ```
//! use yaml_folder::output::{ColorChoice, OutputConfig, Status};
//!
//! let out = OutputConfig::new(ColorChoice::Never);
//! assert_eq!(out.marker(Status::Ok), "[OK]");
//! ```

use clap::ValueEnum;
use std::env;

/// Value of the `--color` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Decorate output regardless of the environment
    Always,
    /// Never decorate output
    Never,
    /// Decide from the environment and the terminal
    #[default]
    Auto,
}

/// Kinds of status line printed by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Scan,
    Ok,
    Warn,
    Error,
    Summary,
    Tree,
}

impl Status {
    fn emoji(self) -> &'static str {
        match self {
            Status::Scan => "🔍",
            Status::Ok => "✅",
            Status::Warn => "⚠️",
            Status::Error => "❌",
            Status::Summary => "📊",
            Status::Tree => "🌳",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Status::Scan => "[SCAN]",
            Status::Ok => "[OK]",
            Status::Warn => "[WARN]",
            Status::Error => "[ERR]",
            Status::Summary => "[INFO]",
            Status::Tree => "[TREE]",
        }
    }
}

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve a `--color` choice against the process environment and stdout.
    pub fn new(choice: ColorChoice) -> Self {
        let use_color = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => detect_with(
                |name| env::var_os(name).map(|v| v.to_string_lossy().into_owned()),
                console::Term::stdout().features().colors_supported(),
            ),
        };
        Self { use_color }
    }

    /// Marker for a status line: the emoji when decorating, else plain text.
    pub fn marker(&self, status: Status) -> &'static str {
        if self.use_color {
            status.emoji()
        } else {
            status.plain()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

/// Decide on decoration from environment lookups and terminal support.
fn detect_with<F>(lookup: F, terminal_supports_color: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    // NO_COLOR disables even when empty
    if lookup("NO_COLOR").is_some() {
        return false;
    }
    if lookup("CLICOLOR").is_some_and(|v| v == "0") {
        return false;
    }
    if lookup("CLICOLOR_FORCE").is_some_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }
    if lookup("TERM").is_some_and(|v| v == "dumb") {
        return false;
    }
    terminal_supports_color
}

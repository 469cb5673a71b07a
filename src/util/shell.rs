//! Centralized shell output.
//!
//! All CLI output goes through Shell: callers specify a semantic status,
//! Shell handles formatting, alignment, and color.

use std::fmt::Display;
use std::io::{self, IsTerminal};

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

/// Status types for output messages.
///
/// Shell handles all formatting - callers just specify the semantic status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Finished,

    // In-progress statuses (cyan)
    Compiling,
    Running,

    // Warning statuses (yellow)
    Warning,

    // Error status (red)
    Error,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Finished => "Finished",
            Status::Compiling => "Compiling",
            Status::Running => "Running",
            Status::Warning => "warning",
            Status::Error => "error",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            // Success: bold green
            Status::Finished => "\x1b[1;32m",
            // In-progress: bold cyan
            Status::Compiling | Status::Running => "\x1b[1;36m",
            // Warning: bold yellow
            Status::Warning => "\x1b[1;33m",
            // Error: bold red
            Status::Error => "\x1b[1;31m",
        }
    }
}

/// Central shell for all CLI output.
#[derive(Debug)]
pub struct Shell {
    use_color: bool,
}

impl Shell {
    /// Create a new shell with the given color choice.
    pub fn new(color: ColorChoice) -> Self {
        let use_color = match color {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };

        Shell { use_color }
    }

    /// Check if colors are enabled.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status message.
    ///
    /// Format: `{status:>12} {message}`, written to stderr.
    pub fn status(&self, status: Status, message: impl Display) {
        if self.use_color {
            eprintln!(
                "{}{:>12}\x1b[0m {}",
                status.color_code(),
                status.as_str(),
                message
            );
        } else {
            eprintln!("{:>12} {}", status.as_str(), message);
        }
    }

    /// Print a warning with its text block.
    pub fn warning(&self, message: impl Display) {
        self.status(Status::Warning, message);
    }

    /// Print an error with its text block.
    pub fn error(&self, message: impl Display) {
        self.status(Status::Error, message);
    }

    /// Print an unprefixed block of text (e.g. compiler diagnostics) to stderr.
    pub fn print_block(&self, text: &str) {
        for line in text.lines() {
            eprintln!("{}", line);
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(ColorChoice::Auto)
    }
}

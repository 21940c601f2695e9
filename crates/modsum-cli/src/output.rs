//! Output formatting for CLI.

use console::{style, Term};
use serde::Serialize;
use std::io::Write;

/// Verbosity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Map `-q` and repeated `-v` flags to a level
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Verbosity::Quiet;
        }
        match verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }

    /// Default `env_logger` filter for this level
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// Output handler for CLI
pub struct Output {
    term: Term,
    verbosity: Verbosity,
    json_mode: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            verbosity: Verbosity::Normal,
            json_mode: false,
        }
    }

    /// Set verbosity level
    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    /// Enable JSON output mode
    pub fn set_json_mode(&mut self, json: bool) {
        self.json_mode = json;
    }

    pub fn is_json(&self) -> bool {
        self.json_mode
    }

    /// Check if output should be shown at given verbosity
    fn should_output(&self, min_verbosity: Verbosity) -> bool {
        !self.json_mode && self.verbosity >= min_verbosity
    }

    /// Write a line
    pub fn writeln(&self, message: &str) {
        if self.should_output(Verbosity::Normal) {
            let _ = writeln!(&self.term, "{}", message);
        }
    }

    /// Write an info message
    pub fn info(&self, message: &str) {
        if self.should_output(Verbosity::Normal) {
            let _ = writeln!(&self.term, "{}", style(message).cyan());
        }
    }

    /// Write a success message
    pub fn success(&self, message: &str) {
        if self.should_output(Verbosity::Normal) {
            let _ = writeln!(&self.term, "{}", style(message).green());
        }
    }

    /// Write a warning message
    pub fn warning(&self, message: &str) {
        if self.should_output(Verbosity::Quiet) {
            let _ = writeln!(&self.term, "{} {}", style("Warning:").yellow().bold(), message);
        }
    }

    /// Write an error message
    pub fn error(&self, message: &str) {
        let _ = writeln!(&self.term, "{} {}", style("Error:").red().bold(), message);
    }

    /// Write a verbose message
    pub fn verbose(&self, message: &str) {
        if self.should_output(Verbosity::Verbose) {
            let _ = writeln!(&self.term, "{}", style(message).dim());
        }
    }

    /// Write a section header
    pub fn section(&self, title: &str) {
        if self.should_output(Verbosity::Normal) {
            let _ = writeln!(&self.term, "\n{}", style(title).bold().underlined());
        }
    }

    /// Write a heavy rule, used around report headers
    pub fn rule(&self) {
        self.writeln(&"=".repeat(70));
    }

    /// Write a light rule, used between demonstration scenarios
    pub fn thin_rule(&self) {
        self.writeln(&"\u{2500}".repeat(70));
    }

    /// Write a list item
    pub fn list_item(&self, prefix: &str, message: &str) {
        if self.should_output(Verbosity::Normal) {
            let _ = writeln!(&self.term, "  {} {}", style(prefix).green(), message);
        }
    }

    /// Print a value as pretty JSON on stdout, only in JSON mode
    pub fn json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        if self.json_mode {
            let rendered = serde_json::to_string_pretty(value)?;
            let _ = writeln!(&self.term, "{}", rendered);
        }
        Ok(())
    }
}

//! Output formatting for the CLI
//!
//! All user-facing output goes through [`OutputFormatter`] so the `--json`
//! and `--no-color` flags behave the same across every command.

use crate::error::Result;
use colored::Colorize;

/// Formats command output as colored text or JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    json: bool,
    no_color: bool,
}

impl OutputFormatter {
    /// Create a formatter from the global CLI flags
    #[must_use]
    pub const fn new(json: bool, no_color: bool) -> Self {
        Self { json, no_color }
    }

    /// Whether JSON output was requested
    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Display a success message
    pub fn success(&self, message: &str) {
        if self.json {
            return;
        }
        if self.no_color {
            println!("{message}");
        } else {
            println!("{}", message.green());
        }
    }

    /// Display an informational message
    pub fn info(&self, message: &str) {
        if self.json {
            return;
        }
        println!("{message}");
    }

    /// Display a warning
    pub fn warning(&self, message: &str) {
        if self.json {
            return;
        }
        if self.no_color {
            eprintln!("Warning: {message}");
        } else {
            eprintln!("{} {message}", "Warning:".yellow().bold());
        }
    }

    /// Display an error message
    pub fn error(&self, message: &str) {
        if self.no_color || self.json {
            eprintln!("Error: {message}");
        } else {
            eprintln!("{} {message}", "Error:".red().bold());
        }
    }

    /// Print a serializable value as pretty JSON
    pub fn print_json<T: serde::Serialize>(&self, value: &T) -> Result<()> {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|e| crate::error::FleetTicketError::custom(e.to_string()))?;
        println!("{rendered}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag() {
        assert!(OutputFormatter::new(true, false).is_json());
        assert!(!OutputFormatter::new(false, true).is_json());
    }
}

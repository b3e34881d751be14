//! Terminal output helpers

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Dump the process-wide request and cache counters to stderr
pub fn print_metrics() {
    let snapshot = safesus_telemetry::metrics().export_json();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(text) => eprintln!("{text}"),
        Err(e) => Status::warning(&format!("Could not render metrics: {e}")),
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "pin", "pins"), "1 pin");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(0, "tip", "tips"), "0 tips");
        assert_eq!(format_count(12, "city", "cities"), "12 cities");
    }
}

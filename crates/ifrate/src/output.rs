//! Output rendering: the status line, or JSON.
//!
//! Stdout carries exactly one line per run; diagnostics and logs go to
//! stderr.

use std::io::{self, Write};

use serde_json::json;

use ifrate_core::{CheckReport, failure_summary};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render a completed check in the chosen format.
pub fn render_report(report: &CheckReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => report.summary(),
        OutputFormat::Json => serde_json::to_string(report)
            .unwrap_or_else(|e| json!({ "verdict": "UNKNOWN", "error": e.to_string() }).to_string()),
    }
}

/// Render a failed check in the chosen format.
pub fn render_failure(err: &CliError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => failure_summary(err.verdict(), err),
        OutputFormat::Json => json!({
            "verdict": err.verdict(),
            "error": err.to_string(),
        })
        .to_string(),
    }
}

/// Print the rendered output to stdout.
pub fn print_output(output: &str) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// First line of a clap error, without the `error: ` prefix.
pub fn usage_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).trim().to_string()
}

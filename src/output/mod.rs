//! Output formatting for the utilization report.
//!
//! This module handles formatting and outputting report rows:
//! - [`report`] - rows built from the subnet pool
//! - [`terminal`] - text output with colors
//! - [`csv`] - CSV output formatting

mod csv;
mod report;
mod terminal;

pub use csv::{format_csv_row, print_csv, CSV_HEADER};
pub use report::{build_report, report_totals, ReportRow};
pub use terminal::{format_field, format_text_row, print_text};

use crate::error::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use clap::ValueEnum;

/// Report output format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

/// How the report is printed.
#[derive(Debug, Clone)]
pub struct ReportStyle {
    pub format: OutputFormat,
    /// Text rows at or above this percentage are highlighted.
    pub warn_at: f64,
    /// Evaluation instant, shown in the text header.
    pub as_of: DateTime<Tz>,
}

/// Print `rows` to stdout in the chosen format.
pub fn print_report(rows: &[ReportRow], style: &ReportStyle) -> Result<()> {
    match style.format {
        OutputFormat::Text => print_text(rows, style),
        OutputFormat::Csv => print_csv(rows),
        OutputFormat::Json => println!("{}", format_json(rows)?),
    }
    Ok(())
}

/// Rows as a pretty-printed JSON array.
pub fn format_json(rows: &[ReportRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

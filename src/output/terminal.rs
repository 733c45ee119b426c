//! Terminal output utilities.
//!
//! Provides formatting helpers and the plain-text report.

use super::report::{report_totals, ReportRow};
use super::ReportStyle;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Render one text report line, without colour.
pub fn format_text_row(row: &ReportRow, key_width: usize) -> String {
    format!("{:<key_width$}  {}", format!("{}:", row.subnet), row.usage_label())
}

/// Print the text report to stdout.
pub fn print_text(rows: &[ReportRow], style: &ReportStyle) {
    println!(
        "# DHCP pool utilization as of {}",
        style.as_of.format("%Y-%m-%d %H:%M:%S %Z")
    );

    let key_width = rows.iter().map(|r| r.subnet.len() + 1).max().unwrap_or(0);
    for row in rows {
        let line = format_text_row(row, key_width);
        match row.percent {
            Some(p) if p >= 100.0 => println!("{}", line.red()),
            Some(p) if p >= style.warn_at => println!("{}", line.yellow()),
            _ => println!("{line}"),
        }
    }

    let (used, total) = report_totals(rows);
    println!(
        "# {} subnet(s), {} in use / {} total",
        rows.len(),
        used,
        total
    );
}

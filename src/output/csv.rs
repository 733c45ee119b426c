//! CSV output formatting for the utilization report.

use super::report::ReportRow;
use super::terminal::format_field;

/// CSV header matching [`format_csv_row`].
pub const CSV_HEADER: &str = r#""subnet","total","in_use","percent","ranges""#;

/// Render a single CSV row.
pub fn format_csv_row(row: &ReportRow) -> String {
    format!(
        "{subnet},{total},{in_use},{percent},{ranges}",
        subnet = format_field(&row.subnet, 0),
        total = format_field(row.total, 0),
        in_use = format_field(row.in_use, 0),
        percent = format_field(
            row.percent
                .map(|p| format!("{p:.1}"))
                .unwrap_or_default(),
            0
        ),
        ranges = format_field(row.ranges.join(" "), 0),
    )
}

/// Print the report as CSV to stdout.
pub fn print_csv(rows: &[ReportRow]) {
    log::debug!("Printing {} report row(s) as CSV", rows.len());
    println!("{CSV_HEADER}");
    for row in rows {
        println!("{}", format_csv_row(row));
    }
}

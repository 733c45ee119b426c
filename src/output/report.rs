//! Report rows built from the final subnet pool.

use crate::models::{Subnet, SubnetPool};
use itertools::Itertools;
use serde::Serialize;

/// One line of the utilization report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub subnet: String,
    pub ranges: Vec<String>,
    pub total: i64,
    pub in_use: u64,
    /// None when the subnet has no positive capacity.
    pub percent: Option<f64>,
}

impl ReportRow {
    pub fn from_subnet(subnet: &Subnet) -> ReportRow {
        ReportRow {
            subnet: subnet.key.clone(),
            ranges: subnet.ranges.iter().map(|r| r.to_string()).collect(),
            total: subnet.total,
            in_use: subnet.in_use,
            percent: subnet.percent_in_use(),
        }
    }

    /// Percentage with one decimal, or `n/a`.
    pub fn percent_label(&self) -> String {
        self.percent
            .map(|p| format!("{p:.1}%"))
            .unwrap_or_else(|| "n/a".to_string())
    }

    /// `<in_use> in use / <total> total (<pct>)`
    pub fn usage_label(&self) -> String {
        format!(
            "{} in use / {} total ({})",
            self.in_use,
            self.total,
            self.percent_label()
        )
    }
}

/// Rows for every subnet, ordered by subnet key.
pub fn build_report(pool: &SubnetPool) -> Vec<ReportRow> {
    pool.iter()
        .sorted_by(|a, b| a.key.cmp(&b.key))
        .map(ReportRow::from_subnet)
        .collect()
}

/// Totals across all rows: (in use, capacity).
pub fn report_totals(rows: &[ReportRow]) -> (u64, i64) {
    rows.iter()
        .fold((0, 0), |(used, total), r| (used + r.in_use, total + r.total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AddressRange;

    fn pool() -> SubnetPool {
        let mut pool = SubnetPool::new();
        let s = pool.open_subnet("10.0.1.0", "255.255.255.0");
        s.add_range(AddressRange::new(
            "10.0.1.1".parse().unwrap(),
            "10.0.1.100".parse().unwrap(),
        ));
        s.in_use = 25;
        let s = pool.open_subnet("10.0.0.0", "255.255.255.0");
        s.add_range(AddressRange::new(
            "10.0.0.10".parse().unwrap(),
            "10.0.0.20".parse().unwrap(),
        ));
        s.in_use = 1;
        pool
    }

    #[test]
    fn test_build_report_sorted_and_labelled() {
        let rows = build_report(&pool());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].subnet, "10.0.0.0/255.255.255.0");
        assert_eq!(rows[0].usage_label(), "1 in use / 11 total (9.1%)");
        assert_eq!(rows[0].ranges, vec!["10.0.0.10-10.0.0.20".to_string()]);
        assert_eq!(rows[1].usage_label(), "25 in use / 100 total (25.0%)");
    }

    #[test]
    fn test_percent_label_without_capacity() {
        let row = ReportRow {
            subnet: "10.0.0.0/255.255.255.0".to_string(),
            ranges: vec![],
            total: 0,
            in_use: 0,
            percent: None,
        };
        assert_eq!(row.percent_label(), "n/a");
    }

    #[test]
    fn test_report_totals() {
        let rows = build_report(&pool());
        assert_eq!(report_totals(&rows), (26, 111));
    }
}

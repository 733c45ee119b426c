//! Lease time parsing and the active-window decision.
//!
//! dhcpd writes lease times as `<weekday> YYYY/MM/DD HH:MM:SS` in UTC, as
//! `never`, or (with `db-time-format local`) as `epoch <seconds>; # <local date>`.

use crate::error::{AuditError, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use clap::ValueEnum;
use regex::Regex;
use std::sync::OnceLock;

static WEEKDAY_TIME_REGEX: OnceLock<Regex> = OnceLock::new();
static EPOCH_TIME_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_weekday_time_regex() -> &'static Regex {
    WEEKDAY_TIME_REGEX.get_or_init(|| {
        Regex::new(r"^[0-6]\s+([0-9]{4}/[0-9]{1,2}/[0-9]{1,2}\s+[0-9]{1,2}:[0-9]{2}:[0-9]{2})$").expect("Invalid Regex")
    })
}

fn get_epoch_time_regex() -> &'static Regex {
    EPOCH_TIME_REGEX.get_or_init(|| Regex::new(r"^epoch\s+([0-9]+)$").expect("Invalid Regex"))
}

/// A lease `starts`/`ends` value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LeaseTime {
    At(DateTime<Utc>),
    Never,
}

/// What to do with a lease that `ends never`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum NeverPolicy {
    /// Refuse the lease with [`AuditError::UnboundedLease`].
    Fatal,
    /// Count the lease as active once it has started.
    Unbounded,
}

/// Parse a lease time value. Trailing `;` and `# comment` are stripped first.
pub fn parse_lease_time(text: &str) -> Result<LeaseTime> {
    let value = text.split('#').next().unwrap_or("").trim();
    let value = value.trim_end_matches(';').trim();
    let malformed = || AuditError::MalformedTimestamp {
        value: text.trim().to_string(),
    };

    if value == "never" {
        return Ok(LeaseTime::Never);
    }

    if let Some(caps) = get_weekday_time_regex().captures(value) {
        let civil = NaiveDateTime::parse_from_str(&caps[1], "%Y/%m/%d %H:%M:%S")
            .map_err(|_| malformed())?;
        return Ok(LeaseTime::At(Utc.from_utc_datetime(&civil)));
    }

    if let Some(caps) = get_epoch_time_regex().captures(value) {
        let secs: i64 = caps[1].parse().map_err(|_| malformed())?;
        let instant = DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(malformed)?;
        return Ok(LeaseTime::At(instant));
    }

    Err(malformed())
}

/// Start and end of a lease.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LeaseWindow {
    pub start: LeaseTime,
    pub end: LeaseTime,
}

impl LeaseWindow {
    pub fn new(start: LeaseTime, end: LeaseTime) -> LeaseWindow {
        LeaseWindow { start, end }
    }

    /// True iff `start <= now <= end`.
    ///
    /// Under [`NeverPolicy::Fatal`] an unbounded end is an error even for a
    /// lease that has not started yet.
    ///
    /// `address` is only used to name the lease in errors.
    pub fn is_active(&self, now: DateTime<Utc>, policy: NeverPolicy, address: &str) -> Result<bool> {
        let start = match self.start {
            LeaseTime::At(start) => start,
            LeaseTime::Never => {
                return Err(AuditError::MalformedTimestamp {
                    value: "starts never".to_string(),
                })
            }
        };

        match (self.end, policy) {
            (LeaseTime::Never, NeverPolicy::Fatal) => Err(AuditError::UnboundedLease {
                address: address.to_string(),
            }),
            (LeaseTime::Never, NeverPolicy::Unbounded) => Ok(start <= now),
            (LeaseTime::At(end), _) => Ok(start <= now && now <= end),
        }
    }
}

/// Evaluation settings shared by every lease in a scan.
#[derive(Debug, Copy, Clone)]
pub struct WindowEvaluator {
    /// The instant leases are checked against.
    pub now: DateTime<Utc>,
    pub never_policy: NeverPolicy,
    /// Skip leases with bad times (warn) instead of failing the run.
    pub skip_malformed: bool,
}

impl WindowEvaluator {
    pub fn new(now: DateTime<Utc>, never_policy: NeverPolicy, skip_malformed: bool) -> Self {
        WindowEvaluator {
            now,
            never_policy,
            skip_malformed,
        }
    }

    /// Parse both raw values and decide whether the lease is active now.
    pub fn is_active(&self, address: &str, start: &str, end: &str) -> Result<bool> {
        let window = LeaseWindow::new(parse_lease_time(start)?, parse_lease_time(end)?);
        window.is_active(self.now, self.never_policy, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(s: &str) -> DateTime<Utc> {
        match parse_lease_time(s).unwrap() {
            LeaseTime::At(t) => t,
            LeaseTime::Never => panic!("expected a time for {s}"),
        }
    }

    #[test]
    fn test_parse_weekday_format_as_utc() {
        let t = at("4 2024/01/11 10:20:30;");
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 1, 11, 10, 20, 30).unwrap());
    }

    #[test]
    fn test_parse_single_digit_fields() {
        let t = at("2 2023/3/7 4:05:06");
        assert_eq!(t, Utc.with_ymd_and_hms(2023, 3, 7, 4, 5, 6).unwrap());
    }

    #[test]
    fn test_parse_never() {
        assert_eq!(parse_lease_time("never;").unwrap(), LeaseTime::Never);
    }

    #[test]
    fn test_parse_epoch_with_comment() {
        let t = at("epoch 1704968430; # Thu Jan 11 10:20:30 2024");
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 1, 11, 10, 20, 30).unwrap());
    }

    #[test]
    fn test_parse_malformed() {
        for bad in [
            "",
            "tomorrow",
            "4 2024-01-11 10:20:30",
            "4 2024/13/11 10:20:30",
            "4 2024/02/30 00:00:00",
            "9 2024/01/11 10:20:30",
        ] {
            let err = parse_lease_time(bad).unwrap_err();
            assert!(matches!(err, AuditError::MalformedTimestamp { .. }), "{bad}");
        }
    }

    #[test]
    fn test_window_active_inclusive_bounds() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let window = LeaseWindow::new(LeaseTime::At(now), LeaseTime::At(now));
        assert!(window.is_active(now, NeverPolicy::Fatal, "10.0.0.1").unwrap());
    }

    #[test]
    fn test_window_past_present_future() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let hour = Duration::hours(1);

        let current = LeaseWindow::new(LeaseTime::At(now - hour), LeaseTime::At(now + hour));
        assert!(current.is_active(now, NeverPolicy::Fatal, "a").unwrap());

        let expired = LeaseWindow::new(LeaseTime::At(now - hour * 2), LeaseTime::At(now - hour));
        assert!(!expired.is_active(now, NeverPolicy::Fatal, "a").unwrap());

        let future = LeaseWindow::new(LeaseTime::At(now + hour), LeaseTime::At(now + hour * 2));
        assert!(!future.is_active(now, NeverPolicy::Fatal, "a").unwrap());
    }

    #[test]
    fn test_window_never_policies() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let hour = Duration::hours(1);
        let started = LeaseWindow::new(LeaseTime::At(now - hour), LeaseTime::Never);
        let pending = LeaseWindow::new(LeaseTime::At(now + hour), LeaseTime::Never);

        assert!(started.is_active(now, NeverPolicy::Unbounded, "a").unwrap());
        assert!(!pending.is_active(now, NeverPolicy::Unbounded, "a").unwrap());

        let err = started
            .is_active(now, NeverPolicy::Fatal, "10.0.0.15")
            .unwrap_err();
        assert!(matches!(err, AuditError::UnboundedLease { ref address } if address == "10.0.0.15"));
        assert!(pending.is_active(now, NeverPolicy::Fatal, "a").is_err());
    }

    #[test]
    fn test_window_starts_never_is_malformed() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let window = LeaseWindow::new(LeaseTime::Never, LeaseTime::At(now));
        assert!(window.is_active(now, NeverPolicy::Unbounded, "a").is_err());
    }

    #[test]
    fn test_evaluator_parses_raw_values() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let eval = WindowEvaluator::new(now, NeverPolicy::Unbounded, false);
        assert!(eval
            .is_active("10.0.0.15", "6 2024/06/01 11:00:00", "6 2024/06/01 13:00:00")
            .unwrap());
        assert!(!eval
            .is_active("10.0.0.15", "5 2024/05/31 11:00:00", "5 2024/05/31 13:00:00")
            .unwrap());
        assert!(eval.is_active("10.0.0.15", "garbage", "never").is_err());
    }
}

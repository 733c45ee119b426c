//! `dhcpd.leases` scanner.
//!
//! The lease log is a sequence of `lease <ip> { ... }` blocks. A block is only
//! evaluated when the next block header or the end of the stream is reached,
//! and only if it carried both a `starts` and an `ends` line.

use super::lease_time::WindowEvaluator;
use super::source::lossy_lines;
use crate::error::{AuditError, Result};
use crate::models::DottedQuad;
use regex::Regex;
use serde::Serialize;
use std::io::BufRead;
use std::sync::OnceLock;

static LEASE_REGEX: OnceLock<Regex> = OnceLock::new();
static STARTS_REGEX: OnceLock<Regex> = OnceLock::new();
static ENDS_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_lease_regex() -> &'static Regex {
    LEASE_REGEX.get_or_init(|| {
        Regex::new(r"^\s*lease\s+([0-9]{1,3}(?:\.[0-9]{1,3}){3})\s*\{").expect("Invalid Regex")
    })
}

fn get_starts_regex() -> &'static Regex {
    STARTS_REGEX.get_or_init(|| Regex::new(r"^\s*starts\s+(.*)$").expect("Invalid Regex"))
}

fn get_ends_regex() -> &'static Regex {
    ENDS_REGEX.get_or_init(|| Regex::new(r"^\s*ends\s+(.*)$").expect("Invalid Regex"))
}

/// Receiver for leases that are active at evaluation time.
pub trait LeaseSink {
    /// Record one active lease. Returns the number of ranges it matched.
    fn record_active_lease(&mut self, address: DottedQuad) -> usize;
}

/// Counters for one pass over the lease log.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaseScanStats {
    /// `lease` blocks seen.
    pub blocks: usize,
    /// Blocks skipped for lacking `starts` or `ends`.
    pub incomplete: usize,
    /// Complete blocks whose window contains the evaluation instant.
    pub active: usize,
    /// Complete blocks outside their window.
    pub inactive: usize,
    /// Blocks skipped for a bad time value (only with `skip_malformed`).
    pub malformed: usize,
}

/// A lease block being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingLease {
    address: DottedQuad,
    start: Option<String>,
    end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    Idle,
    Accumulating(PendingLease),
}

/// Scan a lease log, handing every lease active at `evaluator.now` to `sink`.
///
/// # Returns
/// * `Ok(LeaseScanStats)` - counters for the pass
/// * `Err` - the stream could not be read, or a lease time was unusable and
///   `evaluator.skip_malformed` is off
pub fn scan_leases<R: BufRead, S: LeaseSink>(
    reader: R,
    sink: &mut S,
    evaluator: &WindowEvaluator,
) -> Result<LeaseScanStats> {
    let mut stats = LeaseScanStats::default();
    let mut state = ScanState::Idle;

    for line in lossy_lines(reader) {
        let line = line?;
        if line.trim_start().starts_with('#') {
            continue;
        }

        if let Some(caps) = get_lease_regex().captures(&line) {
            let address: DottedQuad = caps[1].parse()?;
            let previous = std::mem::replace(
                &mut state,
                ScanState::Accumulating(PendingLease {
                    address,
                    start: None,
                    end: None,
                }),
            );
            flush(previous, sink, evaluator, &mut stats)?;
            stats.blocks += 1;
            continue;
        }

        if let ScanState::Accumulating(pending) = &mut state {
            if let Some(caps) = get_starts_regex().captures(&line) {
                pending.start = Some(caps[1].to_string());
            } else if let Some(caps) = get_ends_regex().captures(&line) {
                pending.end = Some(caps[1].to_string());
            }
        }
    }
    flush(state, sink, evaluator, &mut stats)?;

    log::info!(
        "Scanned {} lease block(s): {} active, {} inactive, {} incomplete, {} malformed",
        stats.blocks,
        stats.active,
        stats.inactive,
        stats.incomplete,
        stats.malformed
    );
    Ok(stats)
}

/// Finalize the block held by `state`, if any.
fn flush<S: LeaseSink>(
    state: ScanState,
    sink: &mut S,
    evaluator: &WindowEvaluator,
    stats: &mut LeaseScanStats,
) -> Result<()> {
    let pending = match state {
        ScanState::Idle => return Ok(()),
        ScanState::Accumulating(pending) => pending,
    };

    let (start, end) = match (&pending.start, &pending.end) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            log::trace!("lease {} has no complete time window, skipped", pending.address);
            stats.incomplete += 1;
            return Ok(());
        }
    };

    let address = pending.address.to_string();
    match evaluator.is_active(&address, start, end) {
        Ok(true) => {
            let matches = sink.record_active_lease(pending.address);
            log::trace!("lease {address} active, {matches} range match(es)");
            stats.active += 1;
        }
        Ok(false) => {
            log::trace!("lease {address} not active ({start} .. {end})");
            stats.inactive += 1;
        }
        Err(e @ (AuditError::MalformedTimestamp { .. } | AuditError::UnboundedLease { .. }))
            if evaluator.skip_malformed =>
        {
            log::warn!("Skipping lease {address}: {e}");
            stats.malformed += 1;
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

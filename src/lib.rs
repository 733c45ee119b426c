//! # dhcp-pool-audit
//!
//! Reports DHCP address-pool utilization from a dhcpd configuration and lease
//! database.
//!
//! - [`input`] - parsing `dhcpd.conf` and scanning `dhcpd.leases`
//! - [`models`] - addresses, ranges, subnets
//! - [`processing`] - counting active leases per subnet
//! - [`output`] - text, CSV and JSON reports

pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;
pub mod settings;

pub use error::{AuditError, Result};

use chrono::{DateTime, Utc};
use input::{LeaseScanStats, NeverPolicy, WindowEvaluator};
use models::SubnetPool;
use processing::Aggregator;
use std::path::PathBuf;

/// Inputs and policies for one audit run.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    pub conf: PathBuf,
    pub leases: PathBuf,
    /// Instant lease windows are checked against.
    pub now: DateTime<Utc>,
    pub never_policy: NeverPolicy,
    pub skip_malformed: bool,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub pool: SubnetPool,
    pub stats: LeaseScanStats,
}

/// Parse the configuration into a subnet pool.
pub fn load_subnets(options: &AuditOptions) -> Result<SubnetPool> {
    let reader = input::open_input(&options.conf)?;
    let pool = input::parse_config(reader).map_err(|e| e.in_file(&options.conf))?;
    log::debug!("{pool}");
    Ok(pool)
}

/// Scan the lease log and count active leases into `pool`.
pub fn count_leases(pool: SubnetPool, options: &AuditOptions) -> Result<AuditOutcome> {
    let reader = input::open_input(&options.leases)?;
    let evaluator = WindowEvaluator::new(options.now, options.never_policy, options.skip_malformed);
    let mut aggregator = Aggregator::new(pool);
    let stats = input::scan_leases(reader, &mut aggregator, &evaluator)
        .map_err(|e| e.in_file(&options.leases))?;
    Ok(AuditOutcome {
        pool: aggregator.into_pool(),
        stats,
    })
}

/// Run a full audit: check both files exist, parse the configuration, then
/// count the leases. Any structural error aborts before a report exists.
pub fn run_audit(options: &AuditOptions) -> Result<AuditOutcome> {
    input::ensure_exists(&options.conf)?;
    input::ensure_exists(&options.leases)?;
    log::info!(
        "#Start run_audit() conf={} leases={} now={}",
        options.conf.display(),
        options.leases.display(),
        options.now
    );

    let pool = load_subnets(options)?;
    count_leases(pool, options)
}

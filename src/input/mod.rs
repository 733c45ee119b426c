//! Reading dhcpd input files.
//!
//! This module handles the two text streams the audit consumes:
//! - [`conf`] - subnet and range declarations from `dhcpd.conf`
//! - [`leases`] - lease blocks from `dhcpd.leases`
//! - [`lease_time`] - lease timestamps and the active-window test
//! - [`source`] - opening the files

mod conf;
mod lease_time;
mod leases;
mod source;

// Re-export public types and functions
pub use conf::parse_config;
pub use lease_time::{parse_lease_time, LeaseTime, LeaseWindow, NeverPolicy, WindowEvaluator};
pub use leases::{scan_leases, LeaseScanStats, LeaseSink};
pub use source::{ensure_exists, lossy_lines, open_input, LossyLines};

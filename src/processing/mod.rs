//! Lease processing logic.
//!
//! - [`aggregate`] - counting active leases per subnet

mod aggregate;

// Re-export public types
pub use aggregate::Aggregator;

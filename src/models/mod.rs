//! Domain models for the pool audit.
//!
//! This module contains the core data structures used throughout the application:
//! - [`DottedQuad`] - IPv4 address as four numeric octets
//! - [`AddressRange`] - a `range` declaration with capacity and membership
//! - [`Subnet`] and [`SubnetPool`] - configured subnets and their counters

mod address_range;
mod dotted_quad;
mod subnet;

// Re-export public types
pub use address_range::AddressRange;
pub use dotted_quad::{DottedQuad, OCTETS};
pub use subnet::{subnet_key, Subnet, SubnetPool};

//! Dotted-quad address values.
//!
//! Provides [`DottedQuad`], a 4-octet IPv4 address as it is written in dhcpd
//! files. Octets are kept as plain integers and are not range checked, so a
//! stray `10.0.0.300` still parses and all arithmetic on it stays well defined.

use crate::error::AuditError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of octets in an IPv4 address.
pub const OCTETS: usize = 4;

/// IPv4 address as four numeric octets, most significant first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DottedQuad(pub [u32; OCTETS]);

impl DottedQuad {
    /// Create a [`DottedQuad`] from four octets.
    pub const fn new(a: u32, b: u32, c: u32, d: u32) -> DottedQuad {
        DottedQuad([a, b, c, d])
    }

    /// The four octets.
    pub fn octets(&self) -> [u32; OCTETS] {
        self.0
    }
}

impl FromStr for DottedQuad {
    type Err = AuditError;

    /// Parse `a.b.c.d` where every field is 1-3 decimal digits.
    fn from_str(s: &str) -> Result<DottedQuad, AuditError> {
        let invalid = || AuditError::InvalidAddress {
            value: s.to_string(),
        };
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() != OCTETS {
            return Err(invalid());
        }

        let mut octets = [0u32; OCTETS];
        for (octet, part) in octets.iter_mut().zip(parts) {
            if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *octet = part.parse().map_err(|_| invalid())?;
        }
        Ok(DottedQuad(octets))
    }
}

impl fmt::Display for DottedQuad {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl Serialize for DottedQuad {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

//! Dynamic address range declared with a `range` statement.

use super::DottedQuad;
use serde::Serialize;
use std::fmt;

/// Weight of each octet when turning an octet difference into an address count.
const OCTET_WEIGHTS: [i64; 4] = [256 * 256 * 256, 256 * 256, 256, 1];

/// Inclusive span of addresses between two dotted-quad bounds.
///
/// Bounds are not validated: a range whose `end` sorts before `start` yields a
/// zero or negative [`capacity`](AddressRange::capacity).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AddressRange {
    pub start: DottedQuad,
    pub end: DottedQuad,
}

impl AddressRange {
    pub fn new(start: DottedQuad, end: DottedQuad) -> AddressRange {
        AddressRange { start, end }
    }

    /// Number of addresses from `start` to `end`, both included.
    ///
    /// Weighted big-endian sum of the per-octet differences, plus one.
    ///
    /// # Examples
    /// ```
    /// use dhcp_pool_audit::models::{AddressRange, DottedQuad};
    /// let range = AddressRange::new(DottedQuad::new(10, 0, 0, 10), DottedQuad::new(10, 0, 0, 20));
    /// assert_eq!(range.capacity(), 11);
    /// ```
    pub fn capacity(&self) -> i64 {
        let start = self.start.octets();
        let end = self.end.octets();
        let span: i64 = (0..4)
            .map(|i| (i64::from(end[i]) - i64::from(start[i])) * OCTET_WEIGHTS[i])
            .sum();
        span + 1
    }

    /// Octet-wise box test: every octet of `address` must lie between the
    /// matching octets of `start` and `end`.
    ///
    /// This is not linear containment. A range that crosses an octet boundary
    /// rejects addresses that lie numerically between its bounds.
    pub fn contains(&self, address: DottedQuad) -> bool {
        let start = self.start.octets();
        let end = self.end.octets();
        address
            .octets()
            .iter()
            .enumerate()
            .all(|(i, octet)| start[i] <= *octet && *octet <= end[i])
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

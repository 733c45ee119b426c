//! Configured subnet pools.

use super::{AddressRange, DottedQuad};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A `subnet` declaration with the dynamic ranges declared inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    /// `<network>/<netmask>` as written in the configuration.
    pub key: String,
    /// Unique ranges; repeated declarations collapse.
    pub ranges: BTreeSet<AddressRange>,
    /// Sum of the capacities of `ranges`.
    pub total: i64,
    /// Active lease-to-range matches found so far.
    pub in_use: u64,
}

impl Subnet {
    /// Create an empty subnet for `network`/`netmask`.
    pub fn new(network: &str, netmask: &str) -> Subnet {
        Subnet {
            key: subnet_key(network, netmask),
            ranges: BTreeSet::new(),
            total: 0,
            in_use: 0,
        }
    }

    /// Add a range. Returns false, and leaves `total` alone, if the range was
    /// already declared.
    pub fn add_range(&mut self, range: AddressRange) -> bool {
        if self.ranges.insert(range) {
            self.total += range.capacity();
            true
        } else {
            false
        }
    }

    /// Number of ranges that contain `address`.
    pub fn matching_ranges(&self, address: DottedQuad) -> usize {
        self.ranges.iter().filter(|r| r.contains(address)).count()
    }

    /// Utilization in percent, or None when the subnet has no positive capacity.
    pub fn percent_in_use(&self) -> Option<f64> {
        if self.total > 0 {
            Some(self.in_use as f64 * 100.0 / self.total as f64)
        } else {
            None
        }
    }
}

/// Key used for a subnet in the pool.
pub fn subnet_key(network: &str, netmask: &str) -> String {
    format!("{network}/{netmask}")
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] ({} in use / {} total)",
            self.key,
            self.ranges.iter().join(", "),
            self.in_use,
            self.total
        )
    }
}

/// All configured subnets, ordered by key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubnetPool {
    pub subnets: BTreeMap<String, Subnet>,
}

impl SubnetPool {
    pub fn new() -> SubnetPool {
        SubnetPool {
            subnets: BTreeMap::new(),
        }
    }

    /// Get the subnet for `network`/`netmask`, creating it if needed.
    pub fn open_subnet(&mut self, network: &str, netmask: &str) -> &mut Subnet {
        self.subnets
            .entry(subnet_key(network, netmask))
            .or_insert_with(|| Subnet::new(network, netmask))
    }

    pub fn get(&self, key: &str) -> Option<&Subnet> {
        self.subnets.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Subnet> {
        self.subnets.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.subnets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subnets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subnet> {
        self.subnets.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Subnet> {
        self.subnets.values_mut()
    }

    /// Drop subnets that were declared without any range. Returns the keys removed.
    pub fn drop_empty(&mut self) -> Vec<String> {
        let empty: Vec<String> = self
            .subnets
            .values()
            .filter(|s| s.ranges.is_empty())
            .map(|s| s.key.clone())
            .collect();
        for key in &empty {
            self.subnets.remove(key);
        }
        empty
    }
}

impl fmt::Display for SubnetPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SubnetPool ({} subnets):", self.subnets.len())?;
        for subnet in self.subnets.values() {
            writeln!(f, "  - {subnet}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> AddressRange {
        AddressRange::new(start.parse().unwrap(), end.parse().unwrap())
    }

    #[test]
    fn test_duplicate_range_collapses() {
        let mut subnet = Subnet::new("10.0.0.0", "255.255.255.0");
        assert!(subnet.add_range(range("10.0.0.10", "10.0.0.20")));
        assert!(!subnet.add_range(range("10.0.0.10", "10.0.0.20")));
        assert_eq!(subnet.ranges.len(), 1);
        assert_eq!(subnet.total, 11);
    }

    #[test]
    fn test_total_sums_distinct_ranges() {
        let mut subnet = Subnet::new("10.0.0.0", "255.255.255.0");
        subnet.add_range(range("10.0.0.10", "10.0.0.20"));
        subnet.add_range(range("10.0.0.100", "10.0.0.199"));
        assert_eq!(subnet.total, 111);
        assert_eq!(subnet.key, "10.0.0.0/255.255.255.0");
    }

    #[test]
    fn test_matching_ranges_counts_overlaps() {
        let mut subnet = Subnet::new("10.0.0.0", "255.255.255.0");
        subnet.add_range(range("10.0.0.10", "10.0.0.20"));
        subnet.add_range(range("10.0.0.15", "10.0.0.30"));
        assert_eq!(subnet.matching_ranges(DottedQuad::new(10, 0, 0, 17)), 2);
        assert_eq!(subnet.matching_ranges(DottedQuad::new(10, 0, 0, 25)), 1);
        assert_eq!(subnet.matching_ranges(DottedQuad::new(10, 0, 0, 5)), 0);
    }

    #[test]
    fn test_percent_in_use() {
        let mut subnet = Subnet::new("10.0.0.0", "255.255.255.0");
        assert_eq!(subnet.percent_in_use(), None);
        subnet.add_range(range("10.0.0.10", "10.0.0.20"));
        subnet.in_use = 1;
        let pct = subnet.percent_in_use().unwrap();
        assert_eq!(format!("{pct:.1}"), "9.1");
    }

    #[test]
    fn test_open_subnet_reuses_entry() {
        let mut pool = SubnetPool::new();
        pool.open_subnet("10.0.0.0", "255.255.255.0")
            .add_range(range("10.0.0.1", "10.0.0.5"));
        pool.open_subnet("10.0.0.0", "255.255.255.0")
            .add_range(range("10.0.0.6", "10.0.0.9"));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get("10.0.0.0/255.255.255.0").unwrap().total, 9);
    }

    #[test]
    fn test_drop_empty() {
        let mut pool = SubnetPool::new();
        pool.open_subnet("10.0.0.0", "255.255.255.0")
            .add_range(range("10.0.0.1", "10.0.0.5"));
        pool.open_subnet("10.9.0.0", "255.255.0.0");
        assert_eq!(pool.drop_empty(), vec!["10.9.0.0/255.255.0.0".to_string()]);
        assert_eq!(pool.len(), 1);
    }
}

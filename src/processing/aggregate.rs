//! Counting active leases against configured ranges.

use crate::input::LeaseSink;
use crate::models::{DottedQuad, SubnetPool};

/// Owns the subnet pool while the lease log is scanned.
///
/// Every range that contains a lease adds one to its subnet, so overlapping
/// ranges count the same lease more than once.
#[derive(Debug)]
pub struct Aggregator {
    pool: SubnetPool,
    /// Active leases that matched at least one range.
    pub matched: usize,
    /// Active leases that matched nothing.
    pub unmatched: usize,
}

impl Aggregator {
    pub fn new(pool: SubnetPool) -> Aggregator {
        Aggregator {
            pool,
            matched: 0,
            unmatched: 0,
        }
    }

    /// Add one to every subnet for each of its ranges that contains `address`.
    /// Returns the number of matches.
    pub fn record_active_lease(&mut self, address: DottedQuad) -> usize {
        let mut matches = 0;
        for subnet in self.pool.iter_mut() {
            let hits = subnet.matching_ranges(address);
            subnet.in_use += hits as u64;
            matches += hits;
        }

        if matches == 0 {
            log::debug!("Active lease {address} is outside every configured range");
            self.unmatched += 1;
        } else {
            self.matched += 1;
        }
        matches
    }

    pub fn pool(&self) -> &SubnetPool {
        &self.pool
    }

    /// Give the pool back for reporting.
    pub fn into_pool(self) -> SubnetPool {
        log::info!(
            "Aggregated {} active lease(s) into ranges, {} outside all ranges",
            self.matched,
            self.unmatched
        );
        self.pool
    }
}

impl LeaseSink for Aggregator {
    fn record_active_lease(&mut self, address: DottedQuad) -> usize {
        Aggregator::record_active_lease(self, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AddressRange;

    fn range(start: &str, end: &str) -> AddressRange {
        AddressRange::new(start.parse().unwrap(), end.parse().unwrap())
    }

    fn pool() -> SubnetPool {
        let mut pool = SubnetPool::new();
        pool.open_subnet("10.0.0.0", "255.255.255.0")
            .add_range(range("10.0.0.10", "10.0.0.20"));
        pool.open_subnet("10.0.0.0", "255.255.0.0")
            .add_range(range("10.0.0.15", "10.0.0.30"));
        pool
    }

    #[test]
    fn test_single_match() {
        let mut agg = Aggregator::new(pool());
        assert_eq!(agg.record_active_lease(DottedQuad::new(10, 0, 0, 11)), 1);
        let pool = agg.into_pool();
        assert_eq!(pool.get("10.0.0.0/255.255.255.0").unwrap().in_use, 1);
        assert_eq!(pool.get("10.0.0.0/255.255.0.0").unwrap().in_use, 0);
    }

    #[test]
    fn test_overlap_counts_in_every_subnet() {
        let mut agg = Aggregator::new(pool());
        assert_eq!(agg.record_active_lease(DottedQuad::new(10, 0, 0, 17)), 2);
        assert_eq!(agg.pool().get("10.0.0.0/255.255.255.0").unwrap().in_use, 1);
        assert_eq!(agg.pool().get("10.0.0.0/255.255.0.0").unwrap().in_use, 1);
    }

    #[test]
    fn test_overlap_within_one_subnet_counts_twice() {
        let mut pool = pool();
        pool.get_mut("10.0.0.0/255.255.255.0")
            .unwrap()
            .add_range(range("10.0.0.1", "10.0.0.12"));
        let mut agg = Aggregator::new(pool);
        agg.record_active_lease(DottedQuad::new(10, 0, 0, 11));
        assert_eq!(agg.pool().get("10.0.0.0/255.255.255.0").unwrap().in_use, 2);
    }

    #[test]
    fn test_unmatched_lease_changes_nothing() {
        let mut agg = Aggregator::new(pool());
        assert_eq!(agg.record_active_lease(DottedQuad::new(10, 0, 0, 250)), 0);
        assert_eq!(agg.unmatched, 1);
        assert!(agg.into_pool().iter().all(|s| s.in_use == 0));
    }
}

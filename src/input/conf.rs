//! `dhcpd.conf` subnet and range extraction.
//!
//! Only two statements matter: `subnet <net> netmask <mask>` opens a subnet
//! context and `range [dynamic-bootp] <lo> <hi>` adds a range to it. Everything
//! else in the file is ignored.

use super::source::lossy_lines;
use crate::error::{AuditError, Result};
use crate::models::{AddressRange, DottedQuad, SubnetPool};
use regex::Regex;
use std::io::BufRead;
use std::sync::OnceLock;

static SUBNET_REGEX: OnceLock<Regex> = OnceLock::new();
static RANGE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_subnet_regex() -> &'static Regex {
    SUBNET_REGEX.get_or_init(|| {
        Regex::new(r"^\s*subnet\s+([0-9]{1,3}(?:\.[0-9]{1,3}){3})\s+netmask\s+([0-9]{1,3}(?:\.[0-9]{1,3}){3})\b")
            .expect("Invalid Regex")
    })
}

fn get_range_regex() -> &'static Regex {
    RANGE_REGEX.get_or_init(|| {
        Regex::new(
            r"^\s*range\s+(?:dynamic-bootp\s+)?([0-9]{1,3}(?:\.[0-9]{1,3}){3})\s+([0-9]{1,3}(?:\.[0-9]{1,3}){3})\b",
        )
        .expect("Invalid Regex")
    })
}

/// Parse a configuration stream into a [`SubnetPool`].
///
/// # Returns
/// * `Ok(SubnetPool)` - subnets that declared at least one range
/// * `Err(AuditError::RangeOutsideSubnet)` - a `range` appeared before any `subnet`
/// * `Err(AuditError::Io)` - the stream could not be read (bytes that are not
///   UTF-8 are replaced, not an error)
pub fn parse_config<R: BufRead>(reader: R) -> Result<SubnetPool> {
    let mut pool = SubnetPool::new();
    let mut current: Option<String> = None;

    for (i, line) in lossy_lines(reader).enumerate() {
        let line = line?;
        let line_no = i + 1;
        if line.trim_start().starts_with('#') {
            continue;
        }

        if let Some(caps) = get_subnet_regex().captures(&line) {
            let subnet = pool.open_subnet(&caps[1], &caps[2]);
            log::trace!("conf line {line_no}: subnet {}", subnet.key);
            current = Some(subnet.key.clone());
        } else if let Some(caps) = get_range_regex().captures(&line) {
            let key = current
                .as_deref()
                .ok_or(AuditError::RangeOutsideSubnet { line: line_no })?;
            let start: DottedQuad = caps[1].parse()?;
            let end: DottedQuad = caps[2].parse()?;
            let range = AddressRange::new(start, end);

            if let Some(subnet) = pool.get_mut(key) {
                if subnet.add_range(range) {
                    log::trace!("conf line {line_no}: range {range} -> {key}");
                } else {
                    log::debug!("conf line {line_no}: duplicate range {range} in {key} ignored");
                }
            }
        }
    }

    for key in pool.drop_empty() {
        log::debug!("Subnet {key} declares no ranges, left out of the report");
    }
    log::info!("Parsed {} subnet(s) with ranges from configuration", pool.len());

    Ok(pool)
}

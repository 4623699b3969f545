//! GeoIP data structures.
//!
//! This module defines the database metadata block and the location record
//! returned by lookups.

use serde::Deserialize;
use std::collections::HashMap;

/// Metadata block at the head of an IPDB file
#[derive(Debug, Clone, Deserialize)]
pub struct IpdbMetadata {
    /// Build timestamp (unix seconds)
    pub build: i64,
    /// Bit set: 0x01 = IPv4 data present, 0x02 = IPv6 data present
    pub ip_version: u16,
    /// Language key -> offset of that language's field window in a record
    pub languages: HashMap<String, usize>,
    /// Number of binary-trie nodes
    pub node_count: usize,
    /// Length of the data section (nodes + records) in bytes
    pub total_size: usize,
    /// Field names, in record order
    pub fields: Vec<String>,
}

impl IpdbMetadata {
    /// Whether the trie holds IPv4 networks
    pub fn supports_ipv4(&self) -> bool {
        self.ip_version & 0x01 == 0x01
    }

    /// Whether the trie holds IPv6 networks
    pub fn supports_ipv6(&self) -> bool {
        self.ip_version & 0x02 == 0x02
    }
}

/// Location/ISP record for one address.
///
/// Which fields are populated depends on the database build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Country name
    pub country: Option<String>,
    /// Province / region
    pub province: Option<String>,
    /// City
    pub city: Option<String>,
    /// District within the city
    pub district: Option<String>,
    /// ISP or network owner
    pub isp: Option<String>,
}

impl Location {
    /// Builds a location from parallel field-name/value slices.
    ///
    /// Unrecognised field names are ignored; empty values stay `None`.
    pub fn from_fields(names: &[String], values: &[&str]) -> Self {
        let mut location = Location::default();
        for (name, value) in names.iter().zip(values) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match name.as_str() {
                "country_name" | "country" => &mut location.country,
                "region_name" | "province_name" | "province" => &mut location.province,
                "city_name" | "city" => &mut location.city,
                "district_name" | "district" => &mut location.district,
                "isp_domain" | "owner_domain" | "isp" => &mut location.isp,
                _ => continue,
            };
            // first matching column wins (owner_domain vs isp_domain)
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        location
    }

    /// Non-empty fields joined by single spaces, in country → ISP order.
    ///
    /// Returns an empty string when nothing is known.
    pub fn summary(&self) -> String {
        [
            &self.country,
            &self.province,
            &self.city,
            &self.district,
            &self.isp,
        ]
        .into_iter()
        .filter_map(|field| field.as_deref().map(str::trim))
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

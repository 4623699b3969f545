// Shared test helpers for annotation tests.
//
// This module provides a table-backed `Locator` so the resolver and annotator
// can be tested without a database file.

use std::cell::RefCell;
use std::collections::HashMap;
use std::net::IpAddr;

use ss_ipinfo::{Location, Locator, LookupError};

/// Locator answering from a fixed address table; records every query.
#[derive(Default)]
pub struct TableLocator {
    entries: HashMap<IpAddr, Location>,
    pub queried: RefCell<Vec<IpAddr>>,
}

impl TableLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry; `fields` is (country, province, city, district, isp).
    pub fn with(mut self, ip: &str, fields: [&str; 5]) -> Self {
        let field = |s: &str| (!s.is_empty()).then(|| s.to_string());
        self.entries.insert(
            ip.parse().expect("test address should parse"),
            Location {
                country: field(fields[0]),
                province: field(fields[1]),
                city: field(fields[2]),
                district: field(fields[3]),
                isp: field(fields[4]),
            },
        );
        self
    }
}

impl Locator for TableLocator {
    fn locate(&self, ip: IpAddr) -> Result<Location, LookupError> {
        self.queried.borrow_mut().push(ip);
        self.entries.get(&ip).cloned().ok_or(LookupError::NotFound)
    }
}

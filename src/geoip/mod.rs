//! IP location lookup backed by an IPDB database.
//!
//! This module provides:
//! - Provisioning of the database file (download on first use)
//! - An in-memory IPDB reader
//! - Resolution of `ss` peer columns into location text
//!
//! The loaded database is passed around explicitly as a [`Locator`], so the
//! resolver can be exercised against any lookup implementation.

mod init;
mod lookup;
mod reader;
#[cfg(test)]
pub(crate) mod test_helpers;
mod types;

use std::net::IpAddr;

use crate::error_handling::LookupError;

// Re-export public API
pub use init::{ensure_database, init_geoip, load_database};
pub use lookup::{
    is_local_address, lookup_ip, resolve_peer, strip_port, LOCAL_UNKNOWN, NOT_AVAILABLE, UNKNOWN,
};
pub use reader::IpdbReader;
pub use types::{IpdbMetadata, Location};

/// Address → location lookup.
///
/// Implemented by [`IpdbReader`]; tests substitute their own tables.
pub trait Locator {
    /// Looks up the location record for `ip`.
    fn locate(&self, ip: IpAddr) -> Result<Location, LookupError>;
}

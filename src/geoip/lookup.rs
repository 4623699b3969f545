//! Peer address resolution.
//!
//! Turns an `ss` address column (`1.2.3.4:443`, `[2001:db8::1]:22`, `*:*`) into
//! the text shown in the `IPInfo` column.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

use crate::error_handling::LookupError;
use crate::geoip::Locator;
use crate::utils::compile_regex_unsafe;

/// Local, unspecified or missing address
pub const LOCAL_UNKNOWN: &str = "Local/Unknown";
/// Database hit with no populated fields
pub const UNKNOWN: &str = "Unknown";
/// No resolvable peer on the row
pub const NOT_AVAILABLE: &str = "N/A";

const IPV4_WITH_PORT_PATTERN: &str = r"^(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}):\d+$";
const IPV6_WITH_PORT_PATTERN: &str = r"^\[([^\]]+)\]:\d+$";

static IPV4_WITH_PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(IPV4_WITH_PORT_PATTERN, "IPV4_WITH_PORT_RE"));
static IPV6_WITH_PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(IPV6_WITH_PORT_PATTERN, "IPV6_WITH_PORT_RE"));

/// Strips the port from `ip:port` or `[ip]:port`.
///
/// Returns an empty string for `""`, `"*"`, wildcard ports (`0.0.0.0:*`) and
/// anything else that is not a concrete address with a numeric port.
pub fn strip_port(peer: &str) -> &str {
    if peer.is_empty() || peer == "*" {
        return "";
    }

    let captures = IPV4_WITH_PORT_RE
        .captures(peer)
        .or_else(|| IPV6_WITH_PORT_RE.captures(peer));

    captures
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// True for addresses that never have a meaningful location.
///
/// Covers the empty string, `0.0.0.0`, `127.0.0.1` and, more generally, any
/// unspecified or loopback address (`::`, `::1`, `127.0.0.0/8`, including
/// their IPv4-mapped forms).
pub fn is_local_address(ip: &str) -> bool {
    if ip.is_empty() || ip == "0.0.0.0" || ip == "127.0.0.1" {
        return true;
    }
    match ip.parse::<IpAddr>() {
        Ok(addr) => {
            let addr = addr.to_canonical();
            addr.is_unspecified() || addr.is_loopback()
        }
        Err(_) => false,
    }
}

/// Resolves a bare IP address to its location text.
///
/// Never fails: local addresses give `"Local/Unknown"`, an empty record gives
/// `"Unknown"` and lookup errors are rendered as `"Query failed: <error>"`.
pub fn lookup_ip<L>(locator: &L, ip: &str) -> String
where
    L: Locator + ?Sized,
{
    // Link-local peers carry a zone suffix (`fe80::1%eth0`)
    let unscoped = ip.split_once('%').map_or(ip, |(addr, _)| addr);
    if is_local_address(unscoped) {
        return LOCAL_UNKNOWN.to_string();
    }

    let addr = match unscoped.parse::<IpAddr>() {
        Ok(addr) => addr,
        Err(_) => {
            log::debug!("Unparseable peer address: {}", ip);
            return format!(
                "Query failed: {}",
                LookupError::InvalidAddress(ip.to_string())
            );
        }
    };

    match locator.locate(addr) {
        Ok(location) => {
            let summary = location.summary();
            if summary.is_empty() {
                UNKNOWN.to_string()
            } else {
                summary
            }
        }
        Err(e) => {
            log::debug!("Lookup failed for {}: {}", ip, e);
            format!("Query failed: {}", e)
        }
    }
}

/// Resolves an `ss` peer column (`ip:port` / `[ip]:port`) to its location text.
///
/// Wildcards and anything without a concrete address yield `"N/A"`.
pub fn resolve_peer<L>(locator: &L, peer: &str) -> String
where
    L: Locator + ?Sized,
{
    let ip = strip_port(peer);
    if ip.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    lookup_ip(locator, ip)
}

//! `ss` output annotation.
//!
//! Finds the header row, then appends one location column to every data row.
//! Rows are never parsed into a typed structure: `ss` column layouts vary with
//! its flags, so the peer address is located by pattern matching.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::IPINFO_COLUMN;
use crate::geoip::{resolve_peer, Locator, NOT_AVAILABLE};
use crate::utils::compile_regex_unsafe;

/// Any `ss` address column: `ipv4:port`, `[ipv6]:port`, `*:*` or `0.0.0.0:*`
const ADDRESS_PATTERN: &str =
    r"(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}:\d+|\[[^\]]+\]:\d+|\*:\*|0\.0\.0\.0:\*)";

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(ADDRESS_PATTERN, "ADDRESS_RE"));

/// Index of the header row: the first line mentioning `State` or `Recv-Q`.
pub fn find_header(lines: &[&str]) -> Option<usize> {
    lines
        .iter()
        .position(|line| line.contains("State") || line.contains("Recv-Q"))
}

/// Picks the peer address column out of a data row.
///
/// Heuristic: with two or more address matches the second one is the peer
/// (the first is the local side). With exactly one match, the first
/// whitespace field from the 4th onward that contains an address is taken.
/// Unusual layouts may pick the wrong column; callers treat the result as a
/// best guess.
pub fn select_peer(line: &str) -> Option<&str> {
    let matches: Vec<&str> = ADDRESS_RE.find_iter(line).map(|m| m.as_str()).collect();

    match matches.len() {
        0 => None,
        1 => line
            .split_whitespace()
            .skip(3)
            .find(|field| ADDRESS_RE.is_match(field)),
        _ => Some(matches[1]),
    }
}

/// Appends the peer's location to one data row.
///
/// Blank rows are returned unchanged.
pub fn annotate_line<L>(locator: &L, line: &str) -> String
where
    L: Locator + ?Sized,
{
    if line.trim().is_empty() {
        return line.to_string();
    }

    let info = match select_peer(line) {
        Some(peer) => resolve_peer(locator, peer),
        None => NOT_AVAILABLE.to_string(),
    };
    format!("{} {}", line.trim_end(), info)
}

/// Rewrites captured `ss` output with an `IPInfo` column.
///
/// Lines before the header and blank lines pass through unchanged. Without a
/// header the input is returned as-is. A single trailing newline is preserved.
pub fn annotate_output<L>(locator: &L, output: &str) -> String
where
    L: Locator + ?Sized,
{
    let (body, terminator) = match output.strip_suffix('\n') {
        Some(body) => (body, "\n"),
        None => (output, ""),
    };
    let lines: Vec<&str> = body.split('\n').collect();

    let Some(header_index) = find_header(&lines) else {
        log::debug!("No header row found, leaving output unchanged");
        return output.to_string();
    };

    let mut processed: Vec<String> = Vec::with_capacity(lines.len());
    processed.extend(lines[..header_index].iter().map(|line| line.to_string()));
    processed.push(format!(
        "{} {}",
        lines[header_index].trim_end(),
        IPINFO_COLUMN
    ));
    processed.extend(
        lines[header_index + 1..]
            .iter()
            .map(|line| annotate_line(locator, line)),
    );

    log::debug!(
        "Annotated {} rows",
        lines.len().saturating_sub(header_index + 1)
    );

    let mut result = processed.join("\n");
    result.push_str(terminator);
    result
}

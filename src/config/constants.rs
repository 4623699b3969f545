//! Configuration constants.
//!
//! This module defines the defaults used when the corresponding environment
//! variables are not set, plus fixed operational limits.

use std::time::Duration;

/// Default location of the IPDB database, relative to the working directory
pub const DEFAULT_DB_PATH: &str = "qqwry.ipdb";

/// Download source used when the database file is missing
pub const DEFAULT_DB_URL: &str = "https://cdn.jsdelivr.net/npm/qqwry.raw.ipdb/qqwry.ipdb";

/// Socket statistics executable
pub const DEFAULT_SS_COMMAND: &str = "ss";

/// IPDB language key used to select record fields
pub const DEFAULT_LANGUAGE: &str = "CN";

/// Label appended to the `ss` header row
pub const IPINFO_COLUMN: &str = "IPInfo";

/// Whole-request timeout for the database download (5 minutes for a large file)
pub const DB_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Maximum accepted database size in bytes (200MB)
/// Anything bigger is almost certainly not an IPDB file
pub const MAX_DB_DOWNLOAD_SIZE: usize = 200 * 1024 * 1024;

/// Terminal width handed to `ss` when the real width cannot be determined
pub const FALLBACK_TERMINAL_WIDTH: u16 = 80;

// Environment variable names (see `Config::from_env`)

/// Overrides [`DEFAULT_DB_PATH`]
pub const DB_PATH_ENV: &str = "SS_IPINFO_DB_PATH";
/// Overrides [`DEFAULT_DB_URL`]
pub const DB_URL_ENV: &str = "SS_IPINFO_DB_URL";
/// Overrides [`DEFAULT_SS_COMMAND`]
pub const SS_COMMAND_ENV: &str = "SS_IPINFO_SS_COMMAND";
/// Overrides [`DEFAULT_LANGUAGE`]
pub const LANGUAGE_ENV: &str = "SS_IPINFO_LANGUAGE";
/// Log level (`error` .. `trace`)
pub const LOG_LEVEL_ENV: &str = "SS_IPINFO_LOG_LEVEL";
/// Log format (`plain` or `json`)
pub const LOG_FORMAT_ENV: &str = "SS_IPINFO_LOG_FORMAT";

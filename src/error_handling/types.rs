//! Error type definitions.

use log::SetLoggerError;
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Failures while making sure the database file exists locally.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The HTTP client could not be built or the request never completed.
    #[error("Failed to download {url}: {source}")]
    Network {
        /// Download URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with something other than 2xx.
    #[error("Failed to download {url}: HTTP {status}")]
    HttpStatus {
        /// Download URL
        url: String,
        /// Response status
        status: StatusCode,
    },

    /// The body exceeded the download size limit.
    #[error("Database download from {url} too large: {size} bytes (max: {max} bytes)")]
    TooLarge {
        /// Download URL
        url: String,
        /// Announced or received size in bytes
        size: u64,
        /// Size limit in bytes
        max: usize,
    },

    /// Creating, writing or renaming the local file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        /// File or directory being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors from parsing an IPDB database.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// Database file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is shorter than its headers claim.
    #[error("database file truncated: {0}")]
    Truncated(&'static str),

    /// The metadata block is not valid JSON.
    #[error("invalid database metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Data section length does not match the metadata.
    #[error("database size mismatch: metadata says {expected} bytes, found {actual}")]
    SizeMismatch {
        /// `total_size` from the metadata
        expected: usize,
        /// Bytes present after the metadata
        actual: usize,
    },

    /// Metadata is self-inconsistent (e.g. node table larger than the data section).
    #[error("invalid database layout: {0}")]
    Layout(String),

    /// The configured language has no column window in this database.
    #[error("language {0} not in database")]
    UnknownLanguage(String),
}

/// Errors from running the `ss` command.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The executable is not on `PATH`.
    #[error("{command} command not found, please ensure it's installed")]
    NotInstalled {
        /// Executable name
        command: String,
    },

    /// The process started but exited unsuccessfully.
    #[error("Failed to run {command} command: {status}\nError output: {stderr}")]
    Failed {
        /// Executable name
        command: String,
        /// Exit status as displayed by the OS
        status: String,
        /// Trimmed standard error of the process
        stderr: String,
    },

    /// Any other spawn/wait failure.
    #[error("Failed to run {command} command: {source}")]
    Spawn {
        /// Executable name
        command: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors from a single database lookup.
///
/// These never abort a run; the resolver renders them into the output column.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Not an IPv4 or IPv6 address.
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// IPv4 query against an IPv6-only database.
    #[error("database has no IPv4 data")]
    Ipv4Unsupported,

    /// IPv6 query against an IPv4-only database.
    #[error("database has no IPv6 data")]
    Ipv6Unsupported,

    /// No network in the database covers the address.
    #[error("ip not found")]
    NotFound,

    /// The record pointed to by the trie is malformed.
    #[error("corrupt database record at offset {0}")]
    CorruptRecord(usize),
}

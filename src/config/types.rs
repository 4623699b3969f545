//! Configuration types.
//!
//! This module defines the log level/format enums and the runtime `Config`.
//! The command line is forwarded to `ss` untouched, so every setting of this
//! tool comes from the environment (or a `.env` file loaded by the binary).

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DB_PATH_ENV, DB_URL_ENV, DEFAULT_DB_PATH, DEFAULT_DB_URL, DEFAULT_LANGUAGE,
    DEFAULT_SS_COMMAND, LANGUAGE_ENV, LOG_FORMAT_ENV, LOG_LEVEL_ENV, SS_COMMAND_ENV,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Runtime configuration.
///
/// # Examples
///
/// ```no_run
/// use ss_ipinfo::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("/var/lib/ipdb/qqwry.ipdb"),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Local IPDB database file
    pub db_path: PathBuf,

    /// URL the database is fetched from when `db_path` does not exist
    pub db_url: String,

    /// Executable invoked with the forwarded arguments
    pub ss_command: String,

    /// IPDB language key (selects which record fields are read)
    pub language: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            db_url: DEFAULT_DB_URL.to_string(),
            ss_command: DEFAULT_SS_COMMAND.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Builds the configuration from `SS_IPINFO_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Unset or blank keys keep their defaults, as do unparseable log
    /// level/format values (the logger is configured from them, so there is
    /// nowhere to report the problem yet).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            db_path: get(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            db_url: get(DB_URL_ENV).unwrap_or(defaults.db_url),
            ss_command: get(SS_COMMAND_ENV).unwrap_or(defaults.ss_command),
            language: get(LANGUAGE_ENV).unwrap_or(defaults.language),
            log_level: get(LOG_LEVEL_ENV)
                .and_then(|v| LogLevel::from_str(&v, true).ok())
                .unwrap_or(defaults.log_level),
            log_format: get(LOG_FORMAT_ENV)
                .and_then(|v| LogFormat::from_str(&v, true).ok())
                .unwrap_or(defaults.log_format),
        }
    }
}

//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (database location, download limits, etc.)
//! - Log level and format types
//! - Environment-driven configuration loading
//! - The pass-through command line

mod cli;
mod constants;
mod types;

pub use cli::{usage, Cli};

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};

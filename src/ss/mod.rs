//! `ss` invocation and output annotation.
//!
//! This module provides:
//! - Running the socket statistics command with forwarded arguments
//! - Rewriting its tabular output with an extra `IPInfo` column

mod annotate;
mod command;

// Re-export public API
pub use annotate::{annotate_line, annotate_output, find_header, select_peer};
pub use command::run_ss;

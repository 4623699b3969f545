//! Error types for every stage of a run.
//!
//! Errors are split by stage so callers can tell fatal setup failures apart
//! from per-row lookup failures:
//! - **Initialization**: logger setup
//! - **Provisioning**: fetching the database file
//! - **Database**: parsing the database file
//! - **Command**: running `ss`
//! - **Lookup**: resolving a single address (never fatal, rendered into the output)

mod types;

// Re-export public API
pub use types::{CommandError, DatabaseError, InitializationError, LookupError, ProvisionError};

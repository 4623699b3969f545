//! Application initialization.
//!
//! The IP database is initialized by `geoip::init_geoip`; this module only
//! holds process-wide setup that has to happen before anything logs.

mod logger;

// Re-export public API
pub use logger::init_logger_with;

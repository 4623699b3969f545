//! IP database initialization.
//!
//! Provisions the database file (downloading it on first use) and loads it
//! into memory.

mod loader;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::geoip::reader::IpdbReader;

pub use loader::{ensure_database, load_database};

/// Provisions and loads the configured database.
///
/// Both steps are fatal on failure: there is no degraded mode without a
/// database.
///
/// # Errors
///
/// Returns an error if the file is missing and cannot be downloaded, or if it
/// cannot be read or parsed. Download failures name the URL so the user can
/// fetch the file by hand.
pub async fn init_geoip(config: &Config) -> Result<IpdbReader> {
    ensure_database(&config.db_path, &config.db_url)
        .await
        .with_context(|| {
            format!(
                "Cannot proceed without {} (download it manually from: {})",
                config.db_path.display(),
                config.db_url
            )
        })?;

    load_database(&config.db_path, &config.language)
        .await
        .with_context(|| format!("Failed to load {}", config.db_path.display()))
}

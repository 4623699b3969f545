//! ss_ipinfo library: `ss` output annotated with peer locations
//!
//! Runs the `ss` socket statistics command and appends an `IPInfo` column
//! holding the location and ISP of every connection's peer, looked up in a
//! local IPDB database that is downloaded on first use.
//!
//! # Example
//!
//! ```no_run
//! use ss_ipinfo::{run, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env();
//! let output = run(&config, &["-tn".to_string()]).await?;
//! print!("{}", output);
//! # Ok(())
//! # }
//! ```
//!
//! The pieces are usable on their own; [`annotate_output`] works with any
//! [`Locator`], not just the bundled [`IpdbReader`].

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod geoip;
pub mod initialization;
pub mod ss;
mod utils;

// Re-export public API
pub use config::{Cli, Config, LogFormat, LogLevel};
pub use error_handling::{
    CommandError, DatabaseError, InitializationError, LookupError, ProvisionError,
};
pub use geoip::{resolve_peer, IpdbReader, Location, Locator};
pub use run::run;
pub use ss::{annotate_output, run_ss};

// Internal run module (the provision → load → ss → annotate pipeline)
mod run {
    use anyhow::Result;

    use crate::config::Config;
    use crate::geoip::init_geoip;
    use crate::ss::{annotate_output, run_ss};

    /// Runs one full pass and returns the annotated `ss` output.
    ///
    /// Stages run strictly in order: the database is provisioned and loaded
    /// before `ss` is started, so a missing database never costs a command run.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be provisioned or loaded, or if
    /// `ss` is missing or exits unsuccessfully. Per-row lookup failures are not
    /// errors; they are rendered into the output.
    pub async fn run(config: &Config, args: &[String]) -> Result<String> {
        let reader = init_geoip(config).await?;

        let output = run_ss(&config.ss_command, args).await?;
        log::debug!("{} produced {} bytes", config.ss_command, output.len());

        Ok(annotate_output(&reader, &output))
    }

}

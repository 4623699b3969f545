//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ss_ipinfo` library that handles:
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ss_ipinfo::config::usage;
use ss_ipinfo::initialization::init_logger_with;
use ss_ipinfo::{run, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();
    if cli.ss_args.is_empty() {
        println!("{}", usage());
        return Ok(());
    }

    let config = Config::from_env();
    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run(&config, &cli.ss_args).await {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("ss_ipinfo error: {:#}", e);
            process::exit(1);
        }
    }
}

//! Socket statistics command execution.

use std::io::ErrorKind;

use tokio::process::Command;

use crate::error_handling::CommandError;
use crate::utils::terminal_width;

/// Runs `command` with `args` and returns its standard output.
///
/// `COLUMNS` is set to the real terminal width and `TERM` to `xterm`, so `ss`
/// lays its table out for the user's terminal even though stdout is captured.
///
/// # Errors
///
/// - `CommandError::NotInstalled` if the executable cannot be found
/// - `CommandError::Failed` (with captured stderr) on a non-zero exit
/// - `CommandError::Spawn` for any other spawn/wait failure
pub async fn run_ss(command: &str, args: &[String]) -> Result<String, CommandError> {
    let width = terminal_width();
    log::debug!("Running {} {:?} with COLUMNS={}", command, args, width);

    let output = Command::new(command)
        .args(args)
        .env("COLUMNS", width.to_string())
        .env("TERM", "xterm")
        .output()
        .await
        .map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                CommandError::NotInstalled {
                    command: command.to_string(),
                }
            } else {
                CommandError::Spawn {
                    command: command.to_string(),
                    source,
                }
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
        log::debug!("{} exited with {}", command, output.status);
        return Err(CommandError::Failed {
            command: command.to_string(),
            status: output.status.to_string(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

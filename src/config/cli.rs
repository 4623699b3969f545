//! Command-line surface.
//!
//! Nothing on the command line belongs to this tool: every argument, including
//! `-h` and `--version`, is handed to `ss` unchanged. The one exception is a
//! leading `--`, which clap consumes as its end-of-options marker.

use clap::Parser;

/// Annotates `ss` output with the location and ISP of each peer address.
#[derive(Debug, Parser)]
#[command(
    name = "ss_ipinfo",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Arguments forwarded verbatim to `ss`.
    ///
    /// A `--` in first position is dropped (`ss_ipinfo -- -t` runs `ss -t`);
    /// a `--` anywhere later is forwarded.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub ss_args: Vec<String>,
}

/// Usage text printed when no arguments are given.
pub fn usage() -> String {
    [
        "Usage: ss_ipinfo <ss command arguments>",
        "Example: ss_ipinfo -nltp",
    ]
    .join("\n")
}

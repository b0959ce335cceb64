//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;
use crate::simulate::SimulatedTopology;

/// Command-line interface for the CPU information recorder.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "cpurec")]
#[command(about = "Sample and record CPU topology information")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Report a fixed topology instead of probing the host
    /// (`THREADS:CORES:SOCKETS:CPU`, or `unsupported`)
    #[arg(long, global = true, env = "CPUREC_SIMULATE")]
    pub simulate: Option<SimulatedTopology>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["cpurec", "--verbose", "--simulate", "4:2:1:Intel x86_64", "sample"]);
        assert!(cli.verbose);
        assert!(matches!(cli.simulate, Some(SimulatedTopology::Fixed { hw_threads: 4, .. })));
        assert!(matches!(cli.command, Some(Commands::Sample { json: false })));
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["cpurec"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }
}

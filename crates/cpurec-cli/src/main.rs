//! CLI entry point.
//!
//! Parses arguments, wires the probe via bootstrap and routes each command
//! to its handler. Failures exit with the code from [`CliError::exit_code`].

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cpurec_cli::{Cli, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = bootstrap(cli.simulate);

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let result: Result<(), CliError> = match command {
        Commands::Sample { json } => handlers::sample::execute(&ctx, json),
        Commands::Record { recording, json } => {
            handlers::record::execute(&ctx, &recording, json).await
        }
        Commands::Verify { recording } => handlers::verify::execute(&ctx, &recording).await,
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }

    Ok(())
}

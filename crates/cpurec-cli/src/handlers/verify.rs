//! Verify command handler.
//!
//! Records like `record` does, then checks every event against the CPU
//! information contract and reports the first failing field.

use cpurec_core::verify_cpu_information;
use tracing::info;

use crate::bootstrap::CliContext;
use crate::commands::RecordingArgs;
use crate::error::CliError;
use crate::handlers::record::collect;

/// Execute the verify command.
///
/// # Errors
///
/// Returns [`CliError::Verification`] naming the first field that broke
/// the contract, or the error that prevented recording.
pub async fn execute(ctx: &CliContext, args: &RecordingArgs) -> Result<(), CliError> {
    let events = collect(ctx, args).await?;
    verify_cpu_information(&events)?;

    info!(events = events.len(), "CPU information verified");
    println!("✓ {} event(s) verified", events.len());
    Ok(())
}

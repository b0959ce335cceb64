//! Sample command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_snapshot;

/// Take one snapshot straight from the probe and print it.
///
/// # Errors
///
/// Returns [`CliError::Probe`] if the host topology cannot be read.
pub fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let info = ctx.probe.sample()?;
    print_snapshot(&info, json)
}

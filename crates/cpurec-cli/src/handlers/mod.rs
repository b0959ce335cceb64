//! Command handlers.
//!
//! Handlers follow the same shape:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that drive the probe or a recorder and format output
//!   for the terminal.

pub mod record;
pub mod sample;
pub mod verify;

//! Record command handler.

use std::time::Duration;

use cpurec_core::{RecordedEvents, RecordingError};
use tracing::{debug, warn};

use crate::bootstrap::CliContext;
use crate::commands::RecordingArgs;
use crate::error::CliError;
use crate::presentation::print_events;

/// Run one recording for `duration_ms` and print its events.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the probe failed
/// without producing any event.
pub async fn execute(ctx: &CliContext, args: &RecordingArgs, json: bool) -> Result<(), CliError> {
    let events = collect(ctx, args).await?;
    print_events(&events, json)
}

/// Start a recording, wait, stop it and return its events.
///
/// A failed initial snapshot does not abort the run: periodic samples may
/// still succeed. The probe error is only reported when nothing was
/// recorded at all.
pub(crate) async fn collect(
    ctx: &CliContext,
    args: &RecordingArgs,
) -> Result<RecordedEvents, CliError> {
    let mut recorder = ctx.recorder(args)?;

    let start_error = match recorder.start().await {
        Ok(()) => None,
        Err(RecordingError::Probe(e)) => {
            warn!(error = %e, "Initial CPU snapshot failed");
            Some(e)
        }
        Err(e) => return Err(e.into()),
    };

    if args.duration_ms > 0 {
        debug!(duration_ms = args.duration_ms, "Waiting before stopping recording");
        tokio::time::sleep(Duration::from_millis(args.duration_ms)).await;
    }

    let events = recorder.stop().await?;
    match start_error {
        Some(e) if events.is_empty() => Err(CliError::Probe(e)),
        _ => Ok(events),
    }
}

//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no probing and no recording logic.

use cpurec_core::{CpuInformation, RecordedEvents};
use serde::Serialize;

use crate::error::CliError;

/// Render any serializable value as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))
}

/// Print a single snapshot.
pub fn print_snapshot(info: &CpuInformation, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", to_json(info)?);
    } else {
        println!("{info}");
    }
    Ok(())
}

/// Print every recorded event, one `Event:` block per record.
pub fn print_events(events: &RecordedEvents, json: bool) -> Result<(), CliError> {
    if json {
        let rendered = events
            .to_json_pretty()
            .map_err(|e| CliError::Output(e.to_string()))?;
        println!("{rendered}");
        return Ok(());
    }

    if events.is_empty() {
        println!("No events recorded.");
        return Ok(());
    }

    for event in events {
        println!("Event: {}", event.record());
    }
    Ok(())
}

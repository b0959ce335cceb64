//! Consumer view over a stopped recording.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::error::{FieldError, SessionStateError};
use super::session::Recording;
use crate::domain::CpuInformation;

/// Name of the one event type this crate records.
pub const EVENT_NAME: &str = "cpu.information";

/// A buffered record together with its position in capture order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedEvent {
    sequence: u64,
    #[serde(flatten)]
    record: CpuInformation,
}

impl RecordedEvent {
    pub(crate) const fn new(sequence: u64, record: CpuInformation) -> Self {
        Self { sequence, record }
    }

    /// Event type name, always [`EVENT_NAME`].
    pub const fn name(&self) -> &'static str {
        EVENT_NAME
    }

    /// Zero-based capture index within the recording.
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The underlying snapshot.
    pub const fn record(&self) -> &CpuInformation {
        &self.record
    }
}

impl fmt::Display for RecordedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.record.fmt(f)
    }
}

/// Read-only, restartable view over a stopped recording's events.
///
/// Cloning is cheap and every call to [`RecordedEvents::iter`] starts from
/// the first event again, so the same view can be read any number of times.
#[derive(Debug, Clone)]
pub struct RecordedEvents {
    recording_id: Uuid,
    events: Arc<[RecordedEvent]>,
}

impl RecordedEvents {
    /// Recording these events came from.
    pub const fn recording_id(&self) -> Uuid {
        self.recording_id
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecordedEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RecordedEvent> {
        self.events.get(index)
    }

    /// Fail with [`FieldError::NoEvents`] if nothing was recorded.
    pub fn has_events(&self) -> Result<(), FieldError> {
        if self.events.is_empty() {
            Err(FieldError::NoEvents {
                event: EVENT_NAME.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Render all events as a pretty JSON array.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.events)
    }
}

impl<'a> IntoIterator for &'a RecordedEvents {
    type Item = &'a RecordedEvent;
    type IntoIter = std::slice::Iter<'a, RecordedEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read every event of a stopped recording.
///
/// Fails with [`SessionStateError`] while the recording is idle or started.
pub fn read_all(recording: &Recording) -> Result<RecordedEvents, SessionStateError> {
    Ok(RecordedEvents {
        recording_id: recording.id(),
        events: recording.frozen()?,
    })
}

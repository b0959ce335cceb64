//! The recording session state machine.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use super::consumer::RecordedEvent;
use super::error::{RecordingError, SessionState, SessionStateError};
use crate::domain::CpuInformation;
use crate::ports::TopologyProbePort;
use crate::settings::RecorderSettings;

/// One recording session: `Idle -> Started -> Stopped`.
///
/// The session exclusively owns its buffer. Snapshots are accepted only
/// while started; `stop` freezes the buffer into an immutable, shareable
/// sequence that consumers read through [`super::read_all`].
#[derive(Debug)]
pub struct Recording {
    id: Uuid,
    name: String,
    state: SessionState,
    max_records: usize,
    next_sequence: u64,
    dropped: u64,
    buffer: VecDeque<RecordedEvent>,
    frozen: Option<Arc<[RecordedEvent]>>,
}

impl Recording {
    /// Create an idle recording from settings.
    pub fn new(settings: &RecorderSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: settings.effective_name().to_string(),
            state: SessionState::Idle,
            max_records: settings.effective_max_records().max(1),
            next_sequence: 0,
            dropped: 0,
            buffer: VecDeque::new(),
            frozen: None,
        }
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Number of records currently buffered.
    pub fn len(&self) -> usize {
        self.frozen
            .as_ref()
            .map_or(self.buffer.len(), |frozen| frozen.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records evicted because the buffer was full.
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Start the session and take the initial snapshot.
    ///
    /// The session is started even when the initial snapshot fails; the
    /// probe error is returned and nothing is buffered.
    pub fn start(&mut self, probe: &dyn TopologyProbePort) -> Result<(), RecordingError> {
        self.require(SessionState::Idle, "start")?;
        self.state = SessionState::Started;
        debug!(recording = %self.id, name = %self.name, "Recording started");

        self.capture(probe)
    }

    /// Take one more snapshot while started.
    pub fn sample(&mut self, probe: &dyn TopologyProbePort) -> Result<(), RecordingError> {
        self.require(SessionState::Started, "sample")?;
        self.capture(probe)
    }

    /// Stop the session and freeze the buffer.
    ///
    /// Returns the number of records kept.
    pub fn stop(&mut self) -> Result<usize, SessionStateError> {
        self.require(SessionState::Started, "stop")?;
        self.state = SessionState::Stopped;

        let frozen: Arc<[RecordedEvent]> = std::mem::take(&mut self.buffer).into_iter().collect();
        let count = frozen.len();
        self.frozen = Some(frozen);

        debug!(
            recording = %self.id,
            records = count,
            dropped = self.dropped,
            "Recording stopped"
        );
        Ok(count)
    }

    /// Frozen buffer of a stopped session.
    pub(crate) fn frozen(&self) -> Result<Arc<[RecordedEvent]>, SessionStateError> {
        match &self.frozen {
            Some(frozen) if self.state == SessionState::Stopped => Ok(Arc::clone(frozen)),
            _ => Err(SessionStateError {
                operation: "read",
                state: self.state,
            }),
        }
    }

    fn require(&self, expected: SessionState, operation: &'static str) -> Result<(), SessionStateError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionStateError {
                operation,
                state: self.state,
            })
        }
    }

    fn capture(&mut self, probe: &dyn TopologyProbePort) -> Result<(), RecordingError> {
        let info = probe.sample().inspect_err(|e| {
            warn!(recording = %self.id, error = %e, "CPU information snapshot failed");
        })?;
        self.push(info);
        Ok(())
    }

    fn push(&mut self, info: CpuInformation) {
        if self.buffer.len() >= self.max_records {
            self.buffer.pop_front();
            self.dropped += 1;
            if self.dropped == 1 {
                warn!(
                    recording = %self.id,
                    max_records = self.max_records,
                    "Recording buffer full, dropping oldest records"
                );
            }
        }

        let event = RecordedEvent::new(self.next_sequence, info);
        self.next_sequence += 1;
        self.buffer.push_back(event);
    }
}

impl Default for Recording {
    fn default() -> Self {
        Self::new(&RecorderSettings::with_defaults())
    }
}

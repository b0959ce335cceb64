//! Recorder facade combining a recording session with periodic sampling.

use std::sync::Arc;

use cpurec_core::{
    RecordedEvents, RecorderSettings, Recording, RecordingError, SessionState, SessionStateError,
    TopologyProbePort, read_all,
};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::sampler::PeriodicSampler;

/// Running periodic sampler and the token that stops it.
struct SamplerHandle {
    cancel_token: CancellationToken,
    task: JoinHandle<u64>,
}

/// Owns one recording and drives it from a probe.
///
/// With a sampling period configured, `start` also launches a
/// [`PeriodicSampler`]; `stop` cancels it before freezing the buffer.
pub struct TopologyRecorder {
    probe: Arc<dyn TopologyProbePort>,
    settings: RecorderSettings,
    recording: Arc<Mutex<Recording>>,
    sampler: Option<SamplerHandle>,
}

impl TopologyRecorder {
    /// Create an idle recorder.
    pub fn new(probe: Arc<dyn TopologyProbePort>, settings: RecorderSettings) -> Self {
        let recording = Recording::new(&settings);
        Self {
            probe,
            settings,
            recording: Arc::new(Mutex::new(recording)),
            sampler: None,
        }
    }

    pub async fn state(&self) -> SessionState {
        self.recording.lock().await.state()
    }

    /// Start recording.
    ///
    /// If the initial snapshot fails the recording is still started and
    /// the sampler still launched, so later ticks can fill the buffer; the
    /// probe error is returned after that. Only an invalid state
    /// transition skips the sampler.
    pub async fn start(&mut self) -> Result<(), RecordingError> {
        let mut recording = self.recording.lock().await;
        let initial = match recording.start(self.probe.as_ref()) {
            Ok(()) => Ok(()),
            Err(RecordingError::Probe(e)) => Err(e),
            Err(e @ RecordingError::SessionState(_)) => return Err(e),
        };

        info!(
            recording = %recording.id(),
            name = recording.name(),
            period_ms = self.settings.period_ms,
            initial_snapshot = initial.is_ok(),
            "Recording CPU information"
        );
        drop(recording);

        if let Some(period) = self.settings.effective_period() {
            let cancel_token = CancellationToken::new();
            let task = PeriodicSampler::new(
                Arc::clone(&self.recording),
                Arc::clone(&self.probe),
                period,
                cancel_token.clone(),
            )
            .spawn();
            self.sampler = Some(SamplerHandle { cancel_token, task });
        }

        initial.map_err(RecordingError::from)
    }

    /// Stop recording and return the recorded events.
    pub async fn stop(&mut self) -> Result<RecordedEvents, RecordingError> {
        if let Some(SamplerHandle { cancel_token, task }) = self.sampler.take() {
            cancel_token.cancel();
            if let Err(e) = task.await {
                warn!(error = %e, "Periodic sampler task failed");
            }
        }

        let mut recording = self.recording.lock().await;
        let count = recording.stop()?;
        info!(
            recording = %recording.id(),
            records = count,
            dropped = recording.dropped(),
            "Recording stopped"
        );

        Ok(read_all(&recording)?)
    }

    /// Re-read the events of a stopped recording.
    pub async fn read_all(&self) -> Result<RecordedEvents, SessionStateError> {
        read_all(&*self.recording.lock().await)
    }
}

impl Drop for TopologyRecorder {
    fn drop(&mut self) {
        if let Some(sampler) = &self.sampler {
            sampler.cancel_token.cancel();
        }
    }
}

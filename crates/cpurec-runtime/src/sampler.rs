//! Periodic snapshot sampling for a started recording.
//!
//! The sampler is policy-free: it takes one snapshot per tick while the
//! recording is started and exits on cancellation or once the recording
//! stops accepting snapshots.

use std::sync::Arc;
use std::time::Duration;

use cpurec_core::{Recording, RecordingError, TopologyProbePort};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Takes a snapshot into a shared recording at a fixed interval.
pub struct PeriodicSampler {
    recording: Arc<Mutex<Recording>>,
    probe: Arc<dyn TopologyProbePort>,
    period: Duration,
    cancel_token: CancellationToken,
}

impl PeriodicSampler {
    /// Create a new sampler.
    ///
    /// # Arguments
    ///
    /// * `recording` - Recording to sample into; must already be started
    /// * `probe` - Probe producing each snapshot
    /// * `period` - Time between snapshots
    /// * `cancel_token` - Token to signal sampler shutdown
    pub fn new(
        recording: Arc<Mutex<Recording>>,
        probe: Arc<dyn TopologyProbePort>,
        period: Duration,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            recording,
            probe,
            period,
            cancel_token,
        }
    }

    /// Run on the current task until cancelled.
    ///
    /// Returns the number of snapshots taken. The first tick is skipped
    /// because `Recording::start` already took the initial snapshot.
    pub async fn run(self) -> u64 {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;

        let mut taken = 0u64;
        debug!(period_ms = self.period.as_millis(), "Starting periodic sampler");

        loop {
            tokio::select! {
                biased;
                () = self.cancel_token.cancelled() => {
                    debug!(taken, "Periodic sampler cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    let mut recording = self.recording.lock().await;
                    match recording.sample(self.probe.as_ref()) {
                        Ok(()) => taken += 1,
                        Err(RecordingError::Probe(e)) => {
                            warn!(recording = %recording.id(), error = %e, "Periodic snapshot failed");
                        }
                        Err(RecordingError::SessionState(e)) => {
                            debug!(error = %e, "Recording no longer started, sampler exiting");
                            break;
                        }
                    }
                }
            }
        }

        taken
    }

    /// Run on a spawned tokio task.
    pub fn spawn(self) -> JoinHandle<u64> {
        tokio::spawn(self.run())
    }
}

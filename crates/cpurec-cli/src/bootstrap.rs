//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter: the probe (host or simulated) and the recorder
//! settings built from command-line arguments.

use std::sync::Arc;

use cpurec_core::{RecorderSettings, TopologyProbePort, validate_settings};
use cpurec_runtime::{DefaultTopologyProbe, TopologyRecorder};

use crate::commands::RecordingArgs;
use crate::error::CliError;
use crate::simulate::SimulatedTopology;

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Probe used by every command.
    pub probe: Arc<dyn TopologyProbePort>,
}

impl CliContext {
    /// Build a recorder for one recording with the given arguments.
    pub fn recorder(&self, args: &RecordingArgs) -> Result<TopologyRecorder, CliError> {
        let settings = recorder_settings(args)?;
        Ok(TopologyRecorder::new(Arc::clone(&self.probe), settings))
    }
}

/// Wire the probe.
pub fn bootstrap(simulate: Option<SimulatedTopology>) -> CliContext {
    let probe = match simulate {
        Some(topology) => {
            tracing::debug!(?topology, "Using simulated topology");
            topology.into_probe()
        }
        None => Arc::new(DefaultTopologyProbe::new()),
    };
    CliContext { probe }
}

/// Turn recording arguments into validated settings.
pub fn recorder_settings(args: &RecordingArgs) -> Result<RecorderSettings, CliError> {
    let defaults = RecorderSettings::with_defaults();
    let settings = RecorderSettings {
        name: args.name.clone().or(defaults.name),
        period_ms: args.period_ms.or(defaults.period_ms),
        max_records: args.max_records.or(defaults.max_records),
    };
    validate_settings(&settings)?;
    Ok(settings)
}

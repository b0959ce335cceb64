//! Topology probe port for CPU information sampling.
//!
//! This port abstracts active host probing (sysfs reads, sysctl calls,
//! sysinfo queries) from the core domain. Implementations live in
//! adapters (e.g., cpurec-runtime).
//!
//! # Design Notes
//!
//! - Core owns the trait and error types (pure)
//! - Runtime owns the implementation (active probing)
//! - A probe never reports a zero count; it fails instead

use thiserror::Error;

use crate::domain::CpuInformation;

/// Errors that can occur while sampling the host topology.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The host platform offers no way to read the topology.
    #[error("Topology probing is not supported on {0}")]
    Unsupported(String),

    /// The CPU architecture maps to no known CPU name.
    #[error("Unsupported CPU architecture: {0}")]
    UnsupportedArchitecture(String),

    /// A specific value could not be determined.
    #[error("Could not determine {what}: {reason}")]
    Unavailable { what: &'static str, reason: String },

    /// Reading a topology source failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A topology source had unexpected content.
    #[error("Failed to parse {source_name}: {reason}")]
    Parse { source_name: String, reason: String },

    /// The sampled values would produce an invalid record.
    #[error("Invalid CPU information: {0}")]
    InvariantViolated(String),
}

impl ProbeError {
    /// Shorthand for [`ProbeError::Unavailable`].
    pub fn unavailable(what: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            what,
            reason: reason.into(),
        }
    }
}

/// Result type for topology probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Port for sampling the host CPU topology.
///
/// # Example
///
/// ```ignore
/// use cpurec_core::ports::TopologyProbePort;
///
/// fn print_cpu(probe: &dyn TopologyProbePort) {
///     match probe.sample() {
///         Ok(info) => println!("{info}"),
///         Err(e) => eprintln!("probe failed: {e}"),
///     }
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait TopologyProbePort: Send + Sync {
    /// Take one snapshot of the host topology.
    ///
    /// Each call produces a fresh record with its own timestamp.
    fn sample(&self) -> ProbeResult<CpuInformation>;
}

/// Probe returning a fixed topology, stamped at sample time.
///
/// Used by tests and by the CLI `--simulate` flag.
#[derive(Debug, Clone)]
pub struct StaticTopologyProbe {
    hw_threads: u32,
    cores: u32,
    sockets: u32,
    cpu: String,
    description: String,
}

impl StaticTopologyProbe {
    /// Create a probe that always reports the given topology.
    ///
    /// Values are validated on every sample, so an impossible topology
    /// surfaces as [`ProbeError::InvariantViolated`].
    pub fn new(
        hw_threads: u32,
        cores: u32,
        sockets: u32,
        cpu: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            hw_threads,
            cores,
            sockets,
            cpu: cpu.into(),
            description: description.into(),
        }
    }
}

impl TopologyProbePort for StaticTopologyProbe {
    fn sample(&self) -> ProbeResult<CpuInformation> {
        CpuInformation::new(
            self.hw_threads,
            self.cores,
            self.sockets,
            self.cpu.clone(),
            self.description.clone(),
        )
    }
}

/// Probe that always fails with [`ProbeError::Unsupported`].
#[derive(Debug, Clone, Default)]
pub struct UnsupportedTopologyProbe;

impl TopologyProbePort for UnsupportedTopologyProbe {
    fn sample(&self) -> ProbeResult<CpuInformation> {
        Err(ProbeError::Unsupported(std::env::consts::OS.to_string()))
    }
}

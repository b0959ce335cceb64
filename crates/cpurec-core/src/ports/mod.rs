//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No sysinfo or filesystem types in any signature
//! - Probes return validated domain records or a typed error

pub mod topology_probe;

pub use topology_probe::{
    ProbeError, ProbeResult, StaticTopologyProbe, TopologyProbePort, UnsupportedTopologyProbe,
};

#[cfg(test)]
pub use topology_probe::MockTopologyProbePort;

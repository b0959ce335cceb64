//! Host topology probing and periodic sampling for cpurec.
//!
//! This crate implements the ports defined in `cpurec-core` against the
//! running host and adds the async pieces: a periodic sampler and a
//! recorder facade that owns a recording for its whole lifecycle.

#![deny(unsafe_code)]

mod recorder;
mod sampler;
pub mod system;

#[cfg(test)]
mod test_support;

pub use recorder::TopologyRecorder;
pub use sampler::PeriodicSampler;

// Re-export system probe implementation
pub use system::DefaultTopologyProbe;

//! Probes shared by the async tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use cpurec_core::{CpuInformation, ProbeError, ProbeResult, TopologyProbePort};

/// Reports an Intel 4/2/1 host, failing on the listed (zero-based) calls.
pub struct FlakyProbe {
    calls: AtomicUsize,
    failing: Vec<usize>,
}

impl FlakyProbe {
    pub fn failing_on(failing: &[usize]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failing: failing.to_vec(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TopologyProbePort for FlakyProbe {
    fn sample(&self) -> ProbeResult<CpuInformation> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&call) {
            return Err(ProbeError::unavailable("sockets", "transient read failure"));
        }
        CpuInformation::new(4, 2, 1, "Intel x86_64", "Intel Core i5")
    }
}

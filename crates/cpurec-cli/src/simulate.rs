//! Fixed topologies for `--simulate`.

use std::str::FromStr;
use std::sync::Arc;

use cpurec_core::{StaticTopologyProbe, TopologyProbePort, UnsupportedTopologyProbe};

/// A topology to report instead of probing the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedTopology {
    /// Always report these values.
    Fixed {
        hw_threads: u32,
        cores: u32,
        sockets: u32,
        cpu: String,
    },
    /// Behave like a platform with no topology support.
    Unsupported,
}

impl SimulatedTopology {
    /// Build the probe this topology describes.
    pub fn into_probe(self) -> Arc<dyn TopologyProbePort> {
        match self {
            Self::Fixed {
                hw_threads,
                cores,
                sockets,
                cpu,
            } => Arc::new(StaticTopologyProbe::new(
                hw_threads,
                cores,
                sockets,
                cpu.clone(),
                cpu,
            )),
            Self::Unsupported => Arc::new(UnsupportedTopologyProbe),
        }
    }
}

impl FromStr for SimulatedTopology {
    type Err = String;

    /// Parse `THREADS:CORES:SOCKETS:CPU` or `unsupported`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("unsupported") {
            return Ok(Self::Unsupported);
        }

        let mut parts = s.splitn(4, ':');
        let mut count = |what: &str| -> Result<u32, String> {
            let part = parts
                .next()
                .ok_or_else(|| format!("missing {what} in '{s}'"))?;
            part.trim()
                .parse()
                .map_err(|_| format!("invalid {what} '{part}'"))
        };
        let hw_threads = count("thread count")?;
        let cores = count("core count")?;
        let sockets = count("socket count")?;

        let cpu = parts
            .next()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| format!("missing CPU name in '{s}'"))?;

        Ok(Self::Fixed {
            hw_threads,
            cores,
            sockets,
            cpu: cpu.to_string(),
        })
    }
}

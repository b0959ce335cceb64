//! Counting cores and sockets from per-processor topology ids.

use std::collections::BTreeSet;

use cpurec_core::{ProbeError, ProbeResult};

/// Topology ids of one logical processor.
///
/// `core` is only unique within its `(package, die, cluster)`: arm64
/// device-tree hosts restart core ids in every cluster. Sources that do
/// not report dies or clusters use 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorIds {
    /// Physical package (socket) id.
    pub package: u32,
    /// Die id within the package.
    pub die: u32,
    /// Cluster id within the die.
    pub cluster: u32,
    /// Core id within the cluster.
    pub core: u32,
}

impl ProcessorIds {
    /// Ids for a source that only knows packages and cores.
    pub const fn new(package: u32, core: u32) -> Self {
        Self {
            package,
            die: 0,
            cluster: 0,
            core,
        }
    }
}

/// Hardware thread, core and socket counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyCounts {
    pub hw_threads: u32,
    pub cores: u32,
    pub sockets: u32,
}

impl TopologyCounts {
    /// Count distinct `(package, die, cluster, core)` ids and distinct packages.
    ///
    /// Fails on an empty processor list rather than reporting zero.
    pub fn from_processors(source: &str, processors: &[ProcessorIds]) -> ProbeResult<Self> {
        if processors.is_empty() {
            return Err(ProbeError::Parse {
                source_name: source.to_string(),
                reason: "no processors listed".to_string(),
            });
        }

        let cores: BTreeSet<(u32, u32, u32, u32)> = processors
            .iter()
            .map(|p| (p.package, p.die, p.cluster, p.core))
            .collect();
        let sockets: BTreeSet<u32> = processors.iter().map(|p| p.package).collect();

        Ok(Self {
            hw_threads: to_u32(processors.len()),
            cores: to_u32(cores.len()),
            sockets: to_u32(sockets.len()),
        })
    }
}

pub(crate) fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ids(package: u32, core: u32) -> ProcessorIds {
        ProcessorIds::new(package, core)
    }

    #[test]
    fn test_hyperthreaded_single_socket() {
        let processors = [ids(0, 0), ids(0, 1), ids(0, 0), ids(0, 1)];
        let counts = TopologyCounts::from_processors("test", &processors).unwrap();
        assert_eq!(
            counts,
            TopologyCounts {
                hw_threads: 4,
                cores: 2,
                sockets: 1
            }
        );
    }

    #[test]
    fn test_core_ids_repeat_across_packages() {
        let processors = [ids(0, 0), ids(0, 1), ids(1, 0), ids(1, 1)];
        let counts = TopologyCounts::from_processors("test", &processors).unwrap();
        assert_eq!(counts.cores, 4);
        assert_eq!(counts.sockets, 2);
    }

    #[test]
    fn test_core_ids_repeat_across_clusters() {
        let processors: Vec<ProcessorIds> = [(0, 0), (0, 1), (0, 2), (0, 3), (1, 0), (1, 1)]
            .into_iter()
            .map(|(cluster, core)| ProcessorIds {
                cluster,
                ..ids(0, core)
            })
            .collect();
        let counts = TopologyCounts::from_processors("test", &processors).unwrap();
        assert_eq!(counts.hw_threads, 6);
        assert_eq!(counts.cores, 6);
        assert_eq!(counts.sockets, 1);
    }

    #[test]
    fn test_empty_is_error() {
        assert!(TopologyCounts::from_processors("test", &[]).is_err());
    }
}

//! Linux sysfs topology reader.
//!
//! Reads `cpuN/topology/physical_package_id` and `cpuN/topology/core_id`
//! under a cpu directory root (normally `/sys/devices/system/cpu`), plus
//! `die_id` and `cluster_id` on kernels that expose them.
//! Processors without a `topology` directory are offline and skipped.

use std::fs;
use std::path::Path;

use cpurec_core::{ProbeError, ProbeResult};
use tracing::debug;

use super::topology::{ProcessorIds, TopologyCounts};

/// Default location of the per-processor directories.
pub const SYSFS_CPU_ROOT: &str = "/sys/devices/system/cpu";

/// Count threads, cores and sockets from a sysfs cpu root.
pub fn read_sysfs_topology(root: &Path) -> ProbeResult<TopologyCounts> {
    let entries = fs::read_dir(root).map_err(|source| ProbeError::Io {
        path: root.display().to_string(),
        source,
    })?;

    let mut processors = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ProbeError::Io {
            path: root.display().to_string(),
            source,
        })?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !is_processor_dir(name) {
            continue;
        }

        let topology = entry.path().join("topology");
        if !topology.is_dir() {
            debug!(processor = name, "Skipping processor without topology");
            continue;
        }

        processors.push(ProcessorIds {
            package: read_id(&topology.join("physical_package_id"))?,
            die: read_optional_id(&topology.join("die_id"))?,
            cluster: read_optional_id(&topology.join("cluster_id"))?,
            core: read_id(&topology.join("core_id"))?,
        });
    }

    TopologyCounts::from_processors(&root.display().to_string(), &processors)
}

/// `cpu0`, `cpu17`, but not `cpufreq` or `cpuidle`.
fn is_processor_dir(name: &str) -> bool {
    name.strip_prefix("cpu")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Read a topology id. Negative ids mean "unknown" and collapse to 0.
fn read_id(path: &Path) -> ProbeResult<u32> {
    let text = fs::read_to_string(path).map_err(|source| ProbeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let value: i64 = text.trim().parse().map_err(|_| ProbeError::Parse {
        source_name: path.display().to_string(),
        reason: format!("'{}' is not an integer", text.trim()),
    })?;
    Ok(u32::try_from(value).unwrap_or(0))
}

/// Read an id file that older kernels do not have; absent means 0.
fn read_optional_id(path: &Path) -> ProbeResult<u32> {
    if path.is_file() { read_id(path) } else { Ok(0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn add_cpu(root: &Path, index: u32, package: &str, core: &str) {
        let topology = root.join(format!("cpu{index}")).join("topology");
        fs::create_dir_all(&topology).unwrap();
        fs::write(topology.join("physical_package_id"), format!("{package}\n")).unwrap();
        fs::write(topology.join("core_id"), format!("{core}\n")).unwrap();
    }

    fn fake_root() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_path_buf();
        fs::create_dir_all(root.join("cpufreq")).unwrap();
        fs::create_dir_all(root.join("cpuidle")).unwrap();
        fs::write(root.join("online"), "0-3\n").unwrap();
        (dir, root)
    }

    #[test]
    fn test_hyperthreaded_laptop() {
        let (_dir, root) = fake_root();
        add_cpu(&root, 0, "0", "0");
        add_cpu(&root, 1, "0", "1");
        add_cpu(&root, 2, "0", "0");
        add_cpu(&root, 3, "0", "1");

        let counts = read_sysfs_topology(&root).unwrap();
        assert_eq!(counts.hw_threads, 4);
        assert_eq!(counts.cores, 2);
        assert_eq!(counts.sockets, 1);
    }

    #[test]
    fn test_dual_socket_server() {
        let (_dir, root) = fake_root();
        for i in 0..8 {
            let package = if i < 4 { "0" } else { "1" };
            add_cpu(&root, i, package, &(i % 4).to_string());
        }

        let counts = read_sysfs_topology(&root).unwrap();
        assert_eq!(counts.hw_threads, 8);
        assert_eq!(counts.cores, 8);
        assert_eq!(counts.sockets, 2);
    }

    fn set_cluster(root: &Path, index: u32, cluster: &str) {
        let topology = root.join(format!("cpu{index}")).join("topology");
        fs::write(topology.join("cluster_id"), format!("{cluster}\n")).unwrap();
    }

    #[test]
    fn test_big_little_clusters() {
        // Core ids restart in every cluster of the same package
        let (_dir, root) = fake_root();
        for (index, (cluster, core)) in [(0, 0), (0, 1), (0, 2), (0, 3), (1, 0), (1, 1)]
            .into_iter()
            .enumerate()
        {
            let index = u32::try_from(index).unwrap();
            add_cpu(&root, index, "0", &core.to_string());
            set_cluster(&root, index, &cluster.to_string());
        }

        let counts = read_sysfs_topology(&root).unwrap();
        assert_eq!(counts.hw_threads, 6);
        assert_eq!(counts.cores, 6);
        assert_eq!(counts.sockets, 1);
    }

    #[test]
    fn test_smt_threads_share_cluster() {
        let (_dir, root) = fake_root();
        for index in 0..4 {
            add_cpu(&root, index, "0", &(index % 2).to_string());
            set_cluster(&root, index, &(index % 2).to_string());
        }

        let counts = read_sysfs_topology(&root).unwrap();
        assert_eq!(counts.hw_threads, 4);
        assert_eq!(counts.cores, 2);
    }

    #[test]
    fn test_unknown_package_id() {
        let (_dir, root) = fake_root();
        add_cpu(&root, 0, "-1", "0");
        add_cpu(&root, 1, "-1", "1");

        let counts = read_sysfs_topology(&root).unwrap();
        assert_eq!(counts.sockets, 1);
        assert_eq!(counts.cores, 2);
    }

    #[test]
    fn test_offline_processor_skipped() {
        let (_dir, root) = fake_root();
        add_cpu(&root, 0, "0", "0");
        fs::create_dir_all(root.join("cpu1")).unwrap();

        let counts = read_sysfs_topology(&root).unwrap();
        assert_eq!(counts.hw_threads, 1);
    }

    #[test]
    fn test_garbage_id_is_parse_error() {
        let (_dir, root) = fake_root();
        add_cpu(&root, 0, "zero", "0");
        assert!(matches!(
            read_sysfs_topology(&root),
            Err(ProbeError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            read_sysfs_topology(&missing),
            Err(ProbeError::Io { .. })
        ));
    }

    #[test]
    fn test_no_processors_is_error() {
        let (_dir, root) = fake_root();
        assert!(read_sysfs_topology(&root).is_err());
    }

    #[test]
    fn test_processor_dir_names() {
        assert!(is_processor_dir("cpu0"));
        assert!(is_processor_dir("cpu127"));
        assert!(!is_processor_dir("cpu"));
        assert!(!is_processor_dir("cpufreq"));
        assert!(!is_processor_dir("possible"));
    }
}

//! Topology probe implementation for cpurec-runtime.
//!
//! This module provides the `DefaultTopologyProbe` which implements
//! `TopologyProbePort` from cpurec-core. Processor identity (vendor id,
//! brand string, logical processor count) comes from sysinfo; core and
//! socket counts come from the platform:
//!
//! - Linux: sysfs topology ids, falling back to `/proc/cpuinfo`
//! - macOS: `sysctl hw.physicalcpu` / `hw.packages`
//!
//! Elsewhere sysinfo still reports physical cores, but nothing reports
//! packages, so sampling fails with `ProbeError::Unsupported`.

mod commands;
mod procfs;
mod sysfs;
mod topology;

use std::path::{Path, PathBuf};

use cpurec_core::{
    CpuInformation, ProbeError, ProbeResult, TopologyProbePort, describe_cpu, normalize_cpu_name,
};
use sysinfo::{CpuRefreshKind, RefreshKind, System};
use tracing::debug;

pub use procfs::{CpuInfoSummary, PROC_CPUINFO, parse_cpuinfo};
pub use sysfs::{SYSFS_CPU_ROOT, read_sysfs_topology};
pub use topology::{ProcessorIds, TopologyCounts};

/// Vendor, brand and logical processor count as reported by sysinfo.
#[derive(Debug, Clone)]
struct CpuIdentity {
    vendor_id: String,
    brand: String,
    logical: usize,
}

/// Default implementation of `TopologyProbePort`.
///
/// Construct it once in the composition root and share it; every
/// `sample` call queries the host afresh.
///
/// # Example
///
/// ```ignore
/// use cpurec_runtime::system::DefaultTopologyProbe;
/// use cpurec_core::ports::TopologyProbePort;
///
/// let probe = DefaultTopologyProbe::new();
/// let info = probe.sample()?;
/// ```
#[derive(Debug, Clone)]
pub struct DefaultTopologyProbe {
    sysfs_root: PathBuf,
    cpuinfo_path: PathBuf,
}

impl DefaultTopologyProbe {
    /// Create a probe reading the standard host locations.
    pub fn new() -> Self {
        Self::with_sources(SYSFS_CPU_ROOT, PROC_CPUINFO)
    }

    /// Create a probe reading Linux topology from alternate locations.
    pub fn with_sources(sysfs_root: impl Into<PathBuf>, cpuinfo_path: impl Into<PathBuf>) -> Self {
        Self {
            sysfs_root: sysfs_root.into(),
            cpuinfo_path: cpuinfo_path.into(),
        }
    }

    pub fn sysfs_root(&self) -> &Path {
        &self.sysfs_root
    }

    pub fn cpuinfo_path(&self) -> &Path {
        &self.cpuinfo_path
    }

    fn identity() -> ProbeResult<CpuIdentity> {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()),
        );
        let cpus = sys.cpus();
        let Some(first) = cpus.first() else {
            return Err(ProbeError::unavailable(
                "hardware threads",
                "sysinfo reported no processors",
            ));
        };

        Ok(CpuIdentity {
            vendor_id: first.vendor_id().trim().to_string(),
            brand: first.brand().trim().to_string(),
            logical: cpus.len(),
        })
    }

    /// Linux: sysfs first, `/proc/cpuinfo` second.
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    fn linux_topology(&self) -> ProbeResult<TopologyCounts> {
        match read_sysfs_topology(&self.sysfs_root) {
            Ok(counts) => Ok(counts),
            Err(sysfs_err) => {
                debug!(error = %sysfs_err, "sysfs topology unavailable, trying cpuinfo");
                self.read_cpuinfo()?.counts()
            }
        }
    }

    fn read_cpuinfo(&self) -> ProbeResult<CpuInfoSummary> {
        let text = std::fs::read_to_string(&self.cpuinfo_path).map_err(|source| ProbeError::Io {
            path: self.cpuinfo_path.display().to_string(),
            source,
        })?;
        Ok(parse_cpuinfo(&text))
    }

    #[cfg(target_os = "linux")]
    fn host_topology(&self) -> ProbeResult<TopologyCounts> {
        self.linux_topology()
    }

    #[cfg(target_os = "macos")]
    fn host_topology(&self) -> ProbeResult<TopologyCounts> {
        commands::sysctl_topology()
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    fn host_topology(&self) -> ProbeResult<TopologyCounts> {
        let cores = System::physical_core_count().ok_or_else(|| {
            ProbeError::unavailable("cores", "sysinfo reported no physical cores")
        })?;
        debug!(cores, "Physical cores known, socket count is not");
        Err(ProbeError::Unsupported(format!(
            "{} (socket count unavailable)",
            std::env::consts::OS
        )))
    }

    /// Architecture as sysinfo reports it.
    fn host_arch() -> String {
        resolve_arch(&System::cpu_arch()).to_string()
    }

    /// Fill a blank vendor or brand from `/proc/cpuinfo` where it exists.
    fn complete_identity(&self, mut identity: CpuIdentity) -> CpuIdentity {
        if !cfg!(target_os = "linux") || (!identity.vendor_id.is_empty() && !identity.brand.is_empty()) {
            return identity;
        }
        if let Ok(summary) = self.read_cpuinfo() {
            if identity.vendor_id.is_empty() {
                identity.vendor_id = summary.vendor_id.unwrap_or_default();
            }
            if identity.brand.is_empty() {
                identity.brand = summary.model_name.unwrap_or_default();
            }
        }
        identity
    }

    /// Build a record from already-gathered identity and counts.
    fn assemble(identity: &CpuIdentity, counts: TopologyCounts, arch: &str) -> ProbeResult<CpuInformation> {
        let cpu = normalize_cpu_name(&identity.vendor_id, arch)?;
        let description = describe_cpu(&cpu, &identity.brand);

        if usize::try_from(counts.hw_threads).ok() != Some(identity.logical) {
            debug!(
                topology_threads = counts.hw_threads,
                sysinfo_threads = identity.logical,
                "Topology and sysinfo disagree on hardware threads, using topology"
            );
        }

        CpuInformation::new(counts.hw_threads, counts.cores, counts.sockets, cpu, description)
    }
}

/// sysinfo reports an empty or `unknown` arch when uname fails; use the
/// compile target then.
fn resolve_arch(reported: &str) -> &str {
    let reported = reported.trim();
    if reported.is_empty() || reported.eq_ignore_ascii_case("unknown") {
        std::env::consts::ARCH
    } else {
        reported
    }
}

impl Default for DefaultTopologyProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyProbePort for DefaultTopologyProbe {
    fn sample(&self) -> ProbeResult<CpuInformation> {
        let identity = self.complete_identity(Self::identity()?);
        let counts = self.host_topology()?;
        let info = Self::assemble(&identity, counts, &Self::host_arch())?;

        debug!(
            hw_threads = info.hw_threads(),
            cores = info.cores(),
            sockets = info.sockets(),
            cpu = info.cpu(),
            "Sampled CPU information"
        );
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(vendor: &str, brand: &str, logical: usize) -> CpuIdentity {
        CpuIdentity {
            vendor_id: vendor.to_string(),
            brand: brand.to_string(),
            logical,
        }
    }

    #[test]
    fn test_assemble_intel() {
        let counts = TopologyCounts {
            hw_threads: 4,
            cores: 2,
            sockets: 1,
        };
        let info = DefaultTopologyProbe::assemble(
            &identity("GenuineIntel", "Intel(R) Core(TM) i5-7200U CPU @ 2.50GHz", 4),
            counts,
            "x86_64",
        )
        .unwrap();
        assert_eq!(info.cpu(), "Intel x86_64");
        assert_eq!(info.description(), "Intel(R) Core(TM) i5-7200U CPU @ 2.50GHz");
    }

    #[test]
    fn test_assemble_apple_silicon() {
        let counts = TopologyCounts {
            hw_threads: 8,
            cores: 8,
            sockets: 1,
        };
        let info =
            DefaultTopologyProbe::assemble(&identity("Apple", "Apple M1", 8), counts, "aarch64")
                .unwrap();
        assert_eq!(info.cpu(), "AArch64");
        assert_eq!(info.description(), "AArch64 Apple M1");
    }

    #[test]
    fn test_assemble_rejects_unknown_arch() {
        let counts = TopologyCounts {
            hw_threads: 4,
            cores: 4,
            sockets: 1,
        };
        let err = DefaultTopologyProbe::assemble(&identity("", "SiFive U74", 4), counts, "riscv64")
            .unwrap_err();
        assert!(matches!(err, ProbeError::UnsupportedArchitecture(_)));
    }

    #[test]
    fn test_linux_topology_falls_back_to_cpuinfo() {
        let dir = tempfile::TempDir::new().unwrap();
        let cpuinfo = dir.path().join("cpuinfo");
        std::fs::write(
            &cpuinfo,
            "processor\t: 0\nphysical id\t: 0\ncore id\t: 0\n\nprocessor\t: 1\nphysical id\t: 0\ncore id\t: 0\n",
        )
        .unwrap();

        let probe = DefaultTopologyProbe::with_sources(dir.path().join("missing"), &cpuinfo);
        let counts = probe.linux_topology().unwrap();
        assert_eq!(counts.hw_threads, 2);
        assert_eq!(counts.cores, 1);
        assert_eq!(counts.sockets, 1);
    }

    #[test]
    fn test_linux_topology_fails_without_sources() {
        let dir = tempfile::TempDir::new().unwrap();
        let probe =
            DefaultTopologyProbe::with_sources(dir.path().join("sys"), dir.path().join("cpuinfo"));
        assert!(probe.linux_topology().is_err());
    }

    #[test]
    fn test_resolve_arch() {
        assert_eq!(resolve_arch("aarch64"), "aarch64");
        assert_eq!(resolve_arch(" x86_64\n"), "x86_64");
        assert_eq!(resolve_arch(""), std::env::consts::ARCH);
        assert_eq!(resolve_arch("unknown"), std::env::consts::ARCH);
    }

    #[test]
    fn test_assemble_macos_arm64() {
        // sysinfo reports `arm64` on Apple silicon
        let counts = TopologyCounts {
            hw_threads: 10,
            cores: 10,
            sockets: 1,
        };
        let info = DefaultTopologyProbe::assemble(
            &identity("Apple", "Apple M1 Pro", 10),
            counts,
            resolve_arch("arm64"),
        )
        .unwrap();
        assert_eq!(info.cpu(), "AArch64");
    }
}

//! CPU information record and description normalization.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ports::{ProbeError, ProbeResult};

/// CPU description tokens a record must mention in `cpu` and `description`.
///
/// Matching is case-sensitive.
pub const KNOWN_CPU_TOKENS: [&str; 10] = [
    "Intel",
    "AMD",
    "Unknown x86",
    "ARM",
    "PPC",
    "PowerPC",
    "AArch64",
    "s390",
    "MIPS",
    "LoongArch",
];

/// Returns true if `text` contains at least one of [`KNOWN_CPU_TOKENS`].
pub fn contains_known_token(text: &str) -> bool {
    KNOWN_CPU_TOKENS.iter().any(|token| text.contains(token))
}

/// One point-in-time reading of the host CPU topology.
///
/// Built only through [`CpuInformation::new`], which enforces:
/// - `hw_threads >= 1`, `cores >= 1`, `sockets >= 1`
/// - `cores <= hw_threads` and `sockets <= cores`
/// - `cpu` and `description` are non-empty and mention a known token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpuInformation {
    #[serde(rename = "hwThreads")]
    hw_threads: u32,
    cores: u32,
    sockets: u32,
    cpu: String,
    description: String,
    #[serde(rename = "startTime")]
    timestamp: DateTime<Utc>,
}

impl CpuInformation {
    /// Build a validated record stamped with the current time.
    pub fn new(
        hw_threads: u32,
        cores: u32,
        sockets: u32,
        cpu: impl Into<String>,
        description: impl Into<String>,
    ) -> ProbeResult<Self> {
        Self::at(hw_threads, cores, sockets, cpu, description, Utc::now())
    }

    /// Build a validated record with an explicit timestamp.
    pub fn at(
        hw_threads: u32,
        cores: u32,
        sockets: u32,
        cpu: impl Into<String>,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> ProbeResult<Self> {
        let cpu = cpu.into();
        let description = description.into();

        if hw_threads == 0 || cores == 0 || sockets == 0 {
            return Err(ProbeError::InvariantViolated(format!(
                "counts must be at least 1 (hwThreads={hw_threads}, cores={cores}, sockets={sockets})"
            )));
        }
        if cores > hw_threads {
            return Err(ProbeError::InvariantViolated(format!(
                "cores ({cores}) exceed hardware threads ({hw_threads})"
            )));
        }
        if sockets > cores {
            return Err(ProbeError::InvariantViolated(format!(
                "sockets ({sockets}) exceed cores ({cores})"
            )));
        }
        for (name, value) in [("cpu", &cpu), ("description", &description)] {
            if value.trim().is_empty() {
                return Err(ProbeError::InvariantViolated(format!("{name} is empty")));
            }
            if !contains_known_token(value) {
                return Err(ProbeError::InvariantViolated(format!(
                    "{name} '{value}' names no known CPU vendor or architecture"
                )));
            }
        }

        Ok(Self {
            hw_threads,
            cores,
            sockets,
            cpu,
            description,
            timestamp,
        })
    }

    /// Number of hardware threads (logical processors).
    pub const fn hw_threads(&self) -> u32 {
        self.hw_threads
    }

    /// Number of physical cores.
    pub const fn cores(&self) -> u32 {
        self.cores
    }

    /// Number of sockets (packages).
    pub const fn sockets(&self) -> u32 {
        self.sockets
    }

    /// Short vendor/architecture name, e.g. `Intel x86_64`.
    pub fn cpu(&self) -> &str {
        &self.cpu
    }

    /// Full model description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// When the snapshot was taken.
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for CpuInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cpu.information {{")?;
        writeln!(f, "  startTime = {}", self.timestamp.to_rfc3339())?;
        writeln!(f, "  cpu = \"{}\"", self.cpu)?;
        writeln!(f, "  description = \"{}\"", self.description)?;
        writeln!(f, "  sockets = {}", self.sockets)?;
        writeln!(f, "  cores = {}", self.cores)?;
        writeln!(f, "  hwThreads = {}", self.hw_threads)?;
        write!(f, "}}")
    }
}

/// Map a vendor id and target architecture onto a short CPU name.
///
/// x86 names carry the vendor and the architecture (`Intel x86_64`); every
/// other architecture maps to its family token alone.
pub fn normalize_cpu_name(vendor_id: &str, arch: &str) -> ProbeResult<String> {
    let arch = arch.trim();
    let lower = arch.to_ascii_lowercase();

    let name = match lower.as_str() {
        "x86_64" | "amd64" | "x86" | "i386" | "i586" | "i686" => {
            let vendor = match vendor_id.trim() {
                "GenuineIntel" => "Intel",
                "AuthenticAMD" | "HygonGenuine" => "AMD",
                _ => "Unknown x86",
            };
            format!("{vendor} {arch}")
        }
        "aarch64" | "arm64" => "AArch64".to_string(),
        a if a.starts_with("arm") => "ARM".to_string(),
        a if a.starts_with("powerpc64") || a.starts_with("ppc64") => "PowerPC".to_string(),
        "powerpc" | "ppc" => "PPC".to_string(),
        "s390x" | "s390" => "s390".to_string(),
        a if a.starts_with("mips") => "MIPS".to_string(),
        a if a.starts_with("loongarch") => "LoongArch".to_string(),
        _ => return Err(ProbeError::UnsupportedArchitecture(arch.to_string())),
    };

    Ok(name)
}

/// Build the long description from the short CPU name and the model string.
pub fn describe_cpu(cpu_name: &str, brand: &str) -> String {
    let brand = brand.trim();
    if brand.is_empty() {
        cpu_name.to_string()
    } else if contains_known_token(brand) {
        brand.to_string()
    } else {
        format!("{cpu_name} {brand}")
    }
}

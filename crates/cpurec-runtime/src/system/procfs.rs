//! `/proc/cpuinfo` parser.
//!
//! Used as a fallback topology source when sysfs is unavailable, and for
//! the vendor and model strings when sysinfo reports none.

use cpurec_core::{ProbeError, ProbeResult};

use super::topology::{ProcessorIds, TopologyCounts};

/// Default cpuinfo location.
pub const PROC_CPUINFO: &str = "/proc/cpuinfo";

/// What `/proc/cpuinfo` says about the processors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuInfoSummary {
    /// Number of `processor` blocks.
    pub processors: usize,
    /// Topology ids of blocks that carry both `physical id` and `core id`.
    pub ids: Vec<ProcessorIds>,
    /// First `vendor_id` seen.
    pub vendor_id: Option<String>,
    /// First model string (`model name`, or `cpu` on POWER).
    pub model_name: Option<String>,
}

impl CpuInfoSummary {
    /// Topology counts, if every processor carried its ids.
    pub fn counts(&self) -> ProbeResult<TopologyCounts> {
        if self.ids.is_empty() || self.ids.len() != self.processors {
            return Err(ProbeError::unavailable(
                "sockets",
                format!("{PROC_CPUINFO} lists no physical id for some processors"),
            ));
        }
        TopologyCounts::from_processors(PROC_CPUINFO, &self.ids)
    }
}

/// Parse the text of `/proc/cpuinfo`.
pub fn parse_cpuinfo(text: &str) -> CpuInfoSummary {
    let mut summary = CpuInfoSummary::default();
    let mut package: Option<u32> = None;
    let mut core: Option<u32> = None;
    let mut in_block = false;

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            if line.trim().is_empty() && in_block {
                finish_block(&mut summary, &mut package, &mut core);
                in_block = false;
            }
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "processor" => {
                if in_block {
                    finish_block(&mut summary, &mut package, &mut core);
                }
                in_block = true;
                summary.processors += 1;
            }
            "physical id" => package = value.parse().ok(),
            "core id" => core = value.parse().ok(),
            "vendor_id" if summary.vendor_id.is_none() && !value.is_empty() => {
                summary.vendor_id = Some(value.to_string());
            }
            "model name" | "cpu" if summary.model_name.is_none() && !value.is_empty() => {
                summary.model_name = Some(value.to_string());
            }
            _ => {}
        }
    }
    if in_block {
        finish_block(&mut summary, &mut package, &mut core);
    }

    summary
}

fn finish_block(summary: &mut CpuInfoSummary, package: &mut Option<u32>, core: &mut Option<u32>) {
    if let (Some(package), Some(core)) = (package.take(), core.take()) {
        summary.ids.push(ProcessorIds::new(package, core));
    }
}

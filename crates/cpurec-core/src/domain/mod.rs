//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (sysfs, sysinfo, processes).
//!
//! # Structure
//!
//! - `cpu` - The `CpuInformation` record and CPU name normalization

mod cpu;

pub use cpu::{
    CpuInformation, KNOWN_CPU_TOKENS, contains_known_token, describe_cpu, normalize_cpu_name,
};

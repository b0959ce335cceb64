//! Topology queries that shell out to platform tools.
//!
//! macOS answers through `sysctl`. Output parsing is kept in plain
//! functions so it can be tested on any host.

use std::process::Command;

use cpurec_core::{ProbeError, ProbeResult};

use super::topology::TopologyCounts;

/// Run a command and return its stdout, failing on a non-zero exit.
pub fn run_command(cmd: &str, args: &[&str]) -> ProbeResult<String> {
    let output = Command::new(cmd)
        .args(args)
        .output()
        .map_err(|source| ProbeError::Io {
            path: cmd.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProbeError::unavailable(
            "topology",
            format!("{cmd} {} failed: {}", args.join(" "), stderr.trim()),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Read one numeric sysctl value, e.g. `hw.packages`.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub fn sysctl_u32(name: &str) -> ProbeResult<u32> {
    let output = run_command("sysctl", &["-n", name])?;
    parse_u32(name, &output)
}

/// macOS topology: `hw.logicalcpu`, `hw.physicalcpu`, `hw.packages`.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub fn sysctl_topology() -> ProbeResult<TopologyCounts> {
    Ok(TopologyCounts {
        hw_threads: sysctl_u32("hw.logicalcpu")?,
        cores: sysctl_u32("hw.physicalcpu")?,
        sockets: sysctl_u32("hw.packages")?,
    })
}

fn parse_u32(name: &str, text: &str) -> ProbeResult<u32> {
    let trimmed = text.trim();
    trimmed.parse().map_err(|_| ProbeError::Parse {
        source_name: name.to_string(),
        reason: format!("'{trimmed}' is not a count"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u32() {
        assert_eq!(parse_u32("hw.packages", "1\n").unwrap(), 1);
        assert!(matches!(
            parse_u32("hw.packages", "unknown oid"),
            Err(ProbeError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_command() {
        let err = run_command("cpurec-definitely-not-a-command", &[]).unwrap_err();
        assert!(matches!(err, ProbeError::Io { .. }));
    }
}

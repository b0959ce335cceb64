//! CLI-specific error types and mappings.
//!
//! This module maps core errors to exit codes and user-facing messages.

use cpurec_core::{FieldError, ProbeError, RecordingError, SessionStateError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The host topology could not be sampled.
    #[error("Probe failed: {0}")]
    Probe(#[from] ProbeError),

    /// A recorded event broke the CPU information contract.
    #[error("Verification failed: {0}")]
    Verification(#[from] FieldError),

    /// Invalid recording lifecycle; indicates a bug.
    #[error("Internal error: {0}")]
    SessionState(#[from] SessionStateError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] SettingsError),

    /// Output rendering failed.
    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: Verification failure
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Verification(_) => 1,
            Self::Probe(_) => 69,        // EX_UNAVAILABLE
            Self::SessionState(_) => 70, // EX_SOFTWARE
            Self::Output(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,       // EX_CONFIG
        }
    }
}

impl From<RecordingError> for CliError {
    fn from(err: RecordingError) -> Self {
        match err {
            RecordingError::Probe(e) => Self::Probe(e),
            RecordingError::SessionState(e) => Self::SessionState(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpurec_core::SessionState;

    #[test]
    fn test_exit_codes() {
        let probe: CliError = ProbeError::Unsupported("plan9".to_string()).into();
        assert_eq!(probe.exit_code(), 69);

        let verify: CliError = FieldError::NoEvents {
            event: "cpu.information".to_string(),
        }
        .into();
        assert_eq!(verify.exit_code(), 1);

        let config: CliError = SettingsError::PeriodTooShort(1).into();
        assert_eq!(config.exit_code(), 78);
    }

    #[test]
    fn test_recording_error_mapping() {
        let err: CliError = RecordingError::SessionState(SessionStateError {
            operation: "stop",
            state: SessionState::Idle,
        })
        .into();
        assert_eq!(err.exit_code(), 70);
        assert_eq!(
            err.to_string(),
            "Internal error: Cannot stop a recording that is idle"
        );
    }
}

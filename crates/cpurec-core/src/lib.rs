//! Core domain types, ports and recording sessions for cpurec.
//!
//! This crate holds everything that does not touch the host: the
//! `CpuInformation` record and its invariants, the `TopologyProbePort`
//! trait, the `Recording` session state machine and the consumer view
//! with field accessors. Host probing lives in `cpurec-runtime`.

#![deny(unsafe_code)]

pub mod domain;
pub mod ports;
pub mod recording;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    CpuInformation, KNOWN_CPU_TOKENS, contains_known_token, describe_cpu, normalize_cpu_name,
};
pub use ports::{
    ProbeError, ProbeResult, StaticTopologyProbe, TopologyProbePort, UnsupportedTopologyProbe,
};
pub use recording::{
    EVENT_NAME, FieldAssert, FieldError, FieldValue, RecordedEvent, RecordedEvents, Recording,
    RecordingError, SessionState, SessionStateError, assert_field, read_all,
    verify_cpu_information,
};
pub use settings::{
    DEFAULT_MAX_RECORDS, RecorderSettings, SettingsError, validate_settings,
};

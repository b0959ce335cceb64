//! Recorder settings and validation.
//!
//! Pure configuration types shared by the runtime recorder and the CLI.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default bound on buffered records per recording.
pub const DEFAULT_MAX_RECORDS: usize = 10_000;

/// Smallest accepted sampling period in milliseconds.
pub const MIN_PERIOD_MS: u64 = 10;

/// Largest accepted buffer bound.
pub const MAX_RECORDS_LIMIT: usize = 100_000;

/// Recorder settings.
///
/// All fields are optional so partial configurations fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RecorderSettings {
    /// Name attached to recordings for logging.
    pub name: Option<String>,

    /// Interval between periodic snapshots in milliseconds.
    /// `None` takes only the initial snapshot at start.
    pub period_ms: Option<u64>,

    /// Maximum records kept per recording; oldest are dropped first.
    pub max_records: Option<usize>,
}

impl RecorderSettings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            name: None,
            period_ms: None,
            max_records: Some(DEFAULT_MAX_RECORDS),
        }
    }

    /// Sampling period, if periodic sampling is enabled.
    #[must_use]
    pub const fn effective_period(&self) -> Option<Duration> {
        match self.period_ms {
            Some(ms) => Some(Duration::from_millis(ms)),
            None => None,
        }
    }

    /// Buffer bound (with default fallback).
    #[must_use]
    pub const fn effective_max_records(&self) -> usize {
        match self.max_records {
            Some(max) => max,
            None => DEFAULT_MAX_RECORDS,
        }
    }

    /// Recording name (with default fallback).
    #[must_use]
    pub fn effective_name(&self) -> &str {
        self.name.as_deref().unwrap_or("cpu-information")
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Sampling period must be at least {MIN_PERIOD_MS} ms, got {0}")]
    PeriodTooShort(u64),

    #[error("Max records must be between 1 and {MAX_RECORDS_LIMIT}, got {0}")]
    InvalidMaxRecords(usize),

    #[error("Recording name cannot be empty")]
    EmptyName,
}

/// Validate settings values.
pub fn validate_settings(settings: &RecorderSettings) -> Result<(), SettingsError> {
    if let Some(period) = settings.period_ms {
        if period < MIN_PERIOD_MS {
            return Err(SettingsError::PeriodTooShort(period));
        }
    }

    if let Some(max) = settings.max_records {
        if !(1..=MAX_RECORDS_LIMIT).contains(&max) {
            return Err(SettingsError::InvalidMaxRecords(max));
        }
    }

    if settings.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
        return Err(SettingsError::EmptyName);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = RecorderSettings::with_defaults();
        assert_eq!(settings.period_ms, None);
        assert_eq!(settings.max_records, Some(DEFAULT_MAX_RECORDS));
        assert_eq!(settings.effective_period(), None);
        assert_eq!(settings.effective_name(), "cpu-information");
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_effective_fallbacks() {
        let settings = RecorderSettings::default();
        assert_eq!(settings.effective_max_records(), DEFAULT_MAX_RECORDS);

        let settings = RecorderSettings {
            period_ms: Some(250),
            ..Default::default()
        };
        assert_eq!(settings.effective_period(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_validate_period_too_short() {
        let settings = RecorderSettings {
            period_ms: Some(1),
            ..Default::default()
        };
        assert_eq!(
            validate_settings(&settings),
            Err(SettingsError::PeriodTooShort(1))
        );
    }

    #[test]
    fn test_validate_max_records_bounds() {
        for bad in [0, MAX_RECORDS_LIMIT + 1] {
            let settings = RecorderSettings {
                max_records: Some(bad),
                ..Default::default()
            };
            assert_eq!(
                validate_settings(&settings),
                Err(SettingsError::InvalidMaxRecords(bad))
            );
        }
    }

    #[test]
    fn test_validate_empty_name() {
        let settings = RecorderSettings {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(validate_settings(&settings), Err(SettingsError::EmptyName));
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: RecorderSettings = serde_json::from_str(r#"{"period_ms": 100}"#).unwrap();
        assert_eq!(settings.period_ms, Some(100));
        assert_eq!(settings.max_records, None);
    }
}

//! Schema-checked field access and assertions on recorded events.
//!
//! Field names follow the event schema: `hwThreads`, `cores`, `sockets`,
//! `cpu`, `description` and `startTime`.

use std::fmt;

use chrono::{DateTime, Utc};

use super::consumer::{EVENT_NAME, RecordedEvent, RecordedEvents};
use super::error::FieldError;
use crate::domain::KNOWN_CPU_TOKENS;

/// Value of one event field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Unsigned(u32),
    Text(&'a str),
    Timestamp(DateTime<Utc>),
}

impl FieldValue<'_> {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Unsigned(_) => "an unsigned integer",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "a timestamp",
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl RecordedEvent {
    /// Look up a field by schema name.
    pub fn field(&self, name: &str) -> Result<FieldValue<'_>, FieldError> {
        let record = self.record();
        let value = match name {
            "hwThreads" => FieldValue::Unsigned(record.hw_threads()),
            "cores" => FieldValue::Unsigned(record.cores()),
            "sockets" => FieldValue::Unsigned(record.sockets()),
            "cpu" => FieldValue::Text(record.cpu()),
            "description" => FieldValue::Text(record.description()),
            "startTime" => FieldValue::Timestamp(record.timestamp()),
            _ => {
                return Err(FieldError::Missing {
                    event: EVENT_NAME.to_string(),
                    name: name.to_string(),
                });
            }
        };
        Ok(value)
    }

    /// Look up an integer field.
    pub fn get_unsigned(&self, name: &str) -> Result<u32, FieldError> {
        match self.field(name)? {
            FieldValue::Unsigned(n) => Ok(n),
            other => Err(wrong_type(name, "an unsigned integer", &other)),
        }
    }

    /// Look up a text field.
    pub fn get_text(&self, name: &str) -> Result<&str, FieldError> {
        match self.field(name)? {
            FieldValue::Text(s) => Ok(s),
            other => Err(wrong_type(name, "text", &other)),
        }
    }
}

fn wrong_type(name: &str, expected: &'static str, actual: &FieldValue<'_>) -> FieldError {
    FieldError::WrongType {
        name: name.to_string(),
        expected,
        actual: actual.kind(),
    }
}

/// Pending assertion on one field of one event.
#[derive(Debug)]
pub struct FieldAssert<'a> {
    name: String,
    value: Result<FieldValue<'a>, FieldError>,
}

/// Start an assertion on `event`'s field `name`.
///
/// A missing field surfaces when the assertion is evaluated.
pub fn assert_field<'a>(event: &'a RecordedEvent, name: &str) -> FieldAssert<'a> {
    FieldAssert {
        name: name.to_string(),
        value: event.field(name),
    }
}

impl FieldAssert<'_> {
    /// The field is an integer `>= min`.
    pub fn at_least(self, min: u32) -> Result<(), FieldError> {
        match self.value? {
            FieldValue::Unsigned(n) if n >= min => Ok(()),
            FieldValue::Unsigned(n) => Err(FieldError::Violated {
                name: self.name,
                value: n.to_string(),
                reason: format!("is less than {min}"),
            }),
            other => Err(wrong_type(&self.name, "an unsigned integer", &other)),
        }
    }

    /// The field is text containing at least one of `tokens`.
    pub fn contains_any(self, tokens: &[&str]) -> Result<(), FieldError> {
        match self.value? {
            FieldValue::Text(s) if tokens.iter().any(|t| s.contains(t)) => Ok(()),
            FieldValue::Text(s) => Err(FieldError::Violated {
                name: self.name,
                value: format!("\"{s}\""),
                reason: format!("contains none of {tokens:?}"),
            }),
            other => Err(wrong_type(&self.name, "text", &other)),
        }
    }
}

/// Check the CPU information contract against every recorded event.
///
/// Requires at least one event; every event must report at least one
/// hardware thread, core and socket, and both `cpu` and `description`
/// must mention a known vendor or architecture.
pub fn verify_cpu_information(events: &RecordedEvents) -> Result<(), FieldError> {
    events.has_events()?;
    for event in events {
        assert_field(event, "hwThreads").at_least(1)?;
        assert_field(event, "cores").at_least(1)?;
        assert_field(event, "sockets").at_least(1)?;
        assert_field(event, "cpu").contains_any(&KNOWN_CPU_TOKENS)?;
        assert_field(event, "description").contains_any(&KNOWN_CPU_TOKENS)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CpuInformation;

    fn event() -> RecordedEvent {
        let record = CpuInformation::new(
            16,
            8,
            2,
            "Intel x86_64",
            "Intel(R) Xeon(R) Silver 4108",
        )
        .unwrap();
        RecordedEvent::new(0, record)
    }

    #[test]
    fn test_field_lookup() {
        let event = event();
        assert_eq!(event.field("hwThreads").unwrap(), FieldValue::Unsigned(16));
        assert_eq!(event.get_unsigned("cores").unwrap(), 8);
        assert_eq!(event.get_unsigned("sockets").unwrap(), 2);
        assert_eq!(event.get_text("cpu").unwrap(), "Intel x86_64");
        assert!(matches!(
            event.field("startTime").unwrap(),
            FieldValue::Timestamp(_)
        ));
    }

    #[test]
    fn test_missing_field() {
        let event = event();
        assert_eq!(
            event.field("frequency").unwrap_err(),
            FieldError::Missing {
                event: EVENT_NAME.to_string(),
                name: "frequency".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_type() {
        let event = event();
        let err = event.get_text("cores").unwrap_err();
        assert_eq!(
            err,
            FieldError::WrongType {
                name: "cores".to_string(),
                expected: "text",
                actual: "an unsigned integer",
            }
        );
        assert!(event.get_unsigned("description").is_err());
    }

    #[test]
    fn test_at_least() {
        let event = event();
        assert!(assert_field(&event, "sockets").at_least(1).is_ok());
        assert!(assert_field(&event, "sockets").at_least(2).is_ok());

        let err = assert_field(&event, "sockets").at_least(3).unwrap_err();
        assert_eq!(err.to_string(), "Field 'sockets' = 2 is less than 3");

        assert!(matches!(
            assert_field(&event, "cpu").at_least(1),
            Err(FieldError::WrongType { .. })
        ));
        assert!(matches!(
            assert_field(&event, "threads").at_least(1),
            Err(FieldError::Missing { .. })
        ));
    }

    #[test]
    fn test_contains_any() {
        let event = event();
        assert!(
            assert_field(&event, "description")
                .contains_any(&["AMD", "Xeon"])
                .is_ok()
        );
        let err = assert_field(&event, "cpu")
            .contains_any(&["AMD", "ARM"])
            .unwrap_err();
        assert!(matches!(err, FieldError::Violated { ref name, .. } if name == "cpu"));
    }
}

//! Recording session and field access errors.

use std::fmt;

use thiserror::Error;

use crate::ports::ProbeError;

/// Lifecycle state of a recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Created, not yet started.
    Idle,
    /// Accepting snapshots.
    Started,
    /// Buffer frozen and readable.
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Started => "started",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// An operation was attempted in a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot {operation} a recording that is {state}")]
pub struct SessionStateError {
    /// The rejected operation (`start`, `stop`, `sample`, `read`).
    pub operation: &'static str,
    /// State the session was in.
    pub state: SessionState,
}

/// Errors from driving a recording session.
#[derive(Debug, Error)]
pub enum RecordingError {
    /// Invalid state transition.
    #[error(transparent)]
    SessionState(#[from] SessionStateError),

    /// The snapshot could not be taken. Prior records are untouched.
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

/// Errors from reading or checking recorded event fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The event has no field with this name.
    #[error("Missing field '{name}' in event {event}")]
    Missing { event: String, name: String },

    /// The field exists but holds a different kind of value.
    #[error("Field '{name}' is {actual}, expected {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The field value fails an assertion.
    #[error("Field '{name}' = {value} {reason}")]
    Violated {
        name: String,
        value: String,
        reason: String,
    },

    /// A recording produced no events at all.
    #[error("No events recorded for {event}")]
    NoEvents { event: String },
}

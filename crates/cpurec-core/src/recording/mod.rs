//! Recording sessions and the consumer view over their records.
//!
//! # Structure
//!
//! - `session` - The `Recording` state machine (`Idle -> Started -> Stopped`)
//! - `consumer` - Restartable views over a stopped recording
//! - `fields` - Schema-checked field access and assertions
//! - `error` - Session, recording and field errors
//!
//! # Flow
//!
//! ```ignore
//! let mut recording = Recording::default();
//! recording.start(&probe)?;
//! recording.stop()?;
//! let events = read_all(&recording)?;
//! verify_cpu_information(&events)?;
//! ```

mod consumer;
mod error;
mod fields;
mod session;

pub use consumer::{EVENT_NAME, RecordedEvent, RecordedEvents, read_all};
pub use error::{FieldError, RecordingError, SessionState, SessionStateError};
pub use fields::{FieldAssert, FieldValue, assert_field, verify_cpu_information};
pub use session::Recording;

//! Command-line front end for recording CPU topology information.
//!
//! The binary in `main.rs` only parses arguments, installs logging and
//! dispatches; everything it calls lives here so it can be tested.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only.
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod simulate;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap, recorder_settings};
pub use commands::{Commands, RecordingArgs};
pub use error::CliError;
pub use parser::Cli;
pub use simulate::SimulatedTopology;

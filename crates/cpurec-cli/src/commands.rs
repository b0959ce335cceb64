//! Main commands enum and shared recording arguments.

use clap::{Args, Subcommand};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Take a single CPU information snapshot
    Sample {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record CPU information events for a while and print them
    Record {
        #[command(flatten)]
        recording: RecordingArgs,
        /// Print the events as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Record, then check every event against the CPU information contract
    Verify {
        #[command(flatten)]
        recording: RecordingArgs,
    },
}

/// Options shared by commands that run a recording.
#[derive(Args, Debug, Clone, Default)]
pub struct RecordingArgs {
    /// How long to keep the recording running, in milliseconds
    #[arg(long, default_value_t = 0, env = "CPUREC_DURATION_MS")]
    pub duration_ms: u64,

    /// Take a snapshot every N milliseconds while recording
    #[arg(long, env = "CPUREC_PERIOD_MS")]
    pub period_ms: Option<u64>,

    /// Keep at most N events, dropping the oldest
    #[arg(long, env = "CPUREC_MAX_RECORDS")]
    pub max_records: Option<usize>,

    /// Name attached to the recording in logs
    #[arg(long, env = "CPUREC_NAME")]
    pub name: Option<String>,
}

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while loading and analysing a leaderboard snapshot.
#[derive(Error, Debug)]
pub enum LeaderboardError {
    /// The input text is not well-formed JSON.
    #[error("Malformed snapshot input: {0}")]
    MalformedInput(#[source] serde_json::Error),

    /// The input is valid JSON but does not match the snapshot schema.
    #[error("Snapshot schema validation failed: {0}")]
    SchemaValidation(#[source] serde_json::Error),

    /// The snapshot file does not exist.
    #[error("Snapshot file not found: {0}")]
    NotFound(PathBuf),

    /// The snapshot file exists but could not be read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A timezone name is not a recognised IANA identifier.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// An interval label such as `"5m"` could not be parsed.
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),
}

/// Convenience alias used throughout the leaderboard crates.
pub type Result<T> = std::result::Result<T, LeaderboardError>;

//! Leaderboard snapshot loading.
//!
//! Turns the JSON document exported by the leaderboard API into a typed
//! [`Leaderboard`]. Parsing is all-or-nothing: any error aborts the load and
//! no partial snapshot is returned.

use std::path::Path;

use leaderboard_core::error::{LeaderboardError, Result};
use leaderboard_core::models::Leaderboard;
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a snapshot from its JSON text.
///
/// Fails with [`LeaderboardError::MalformedInput`] when `raw` is not valid
/// JSON, and with [`LeaderboardError::SchemaValidation`] when it is valid JSON
/// but a required field is missing or has the wrong type.
pub fn parse(raw: &str) -> Result<Leaderboard> {
    parse_slice(raw.as_bytes())
}

/// Parse a snapshot from raw bytes. Bytes that are not valid UTF-8 are
/// reported as [`LeaderboardError::MalformedInput`].
pub fn parse_slice(raw: &[u8]) -> Result<Leaderboard> {
    // Syntax first, so the two failure kinds stay distinguishable.
    let value: serde_json::Value =
        serde_json::from_slice(raw).map_err(LeaderboardError::MalformedInput)?;
    let leaderboard: Leaderboard =
        serde_json::from_value(value).map_err(LeaderboardError::SchemaValidation)?;

    log_key_mismatches(&leaderboard);
    debug!(
        "Parsed snapshot for event {} with {} members",
        leaderboard.event_identifier,
        leaderboard.member_count()
    );

    Ok(leaderboard)
}

/// Read and parse a snapshot file.
///
/// Fails with [`LeaderboardError::NotFound`] when `path` does not exist and
/// with [`LeaderboardError::FileRead`] on any other I/O error. The file is
/// closed before parsing starts.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Leaderboard> {
    let path = path.as_ref();
    let contents = read_snapshot(path)?;
    debug!("Read {} bytes from {}", contents.len(), path.display());
    parse_slice(&contents)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn read_snapshot(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> LeaderboardError {
    if source.kind() == std::io::ErrorKind::NotFound {
        LeaderboardError::NotFound(path.to_path_buf())
    } else {
        LeaderboardError::FileRead {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Map keys duplicate `Member::id`; disagreements are tolerated but noted.
fn log_key_mismatches(leaderboard: &Leaderboard) {
    for (key, member) in &leaderboard.members {
        if key.as_str() != member.id.to_string() {
            debug!("Member key {} does not match member id {}", key, member.id);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

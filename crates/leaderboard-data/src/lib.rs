//! Snapshot ingestion and metrics for leaderboard analysis.
//!
//! Parses leaderboard JSON snapshots into the typed model, projects members
//! into flat rows and derives the per-day counts, progression curves and
//! time-to-solve series consumed by the reporting layer.

pub mod analysis;
pub mod parser;
pub mod projector;

pub use leaderboard_core as core;

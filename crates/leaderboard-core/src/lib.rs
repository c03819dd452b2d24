//! Core types for leaderboard analysis.
//!
//! Holds the snapshot data model, the flattened member row, the error
//! taxonomy, daily-epoch resolution in a reference timezone, interval
//! formatting and command-line settings shared by the other crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

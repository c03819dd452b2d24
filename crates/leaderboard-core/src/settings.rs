use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::error::Result;
use crate::formatting::parse_interval_list;
use crate::time_utils::{TimezoneResolver, DEFAULT_REFERENCE_TIMEZONE};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Order in which member rows are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RowOrder {
    /// Keep the snapshot's member order.
    #[default]
    Input,
    /// Fewest stars first; ties broken by most recent last star first.
    Standings,
}

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Analyse a private leaderboard snapshot
#[derive(Parser, Debug, Clone)]
#[command(
    name = "aoc-leaderboard",
    about = "Analyse a private leaderboard snapshot",
    version
)]
pub struct Settings {
    /// Path to the leaderboard JSON snapshot
    pub snapshot: PathBuf,

    /// Reference timezone in which puzzles unlock at midnight
    #[arg(long, env = "AOC_TIMEZONE", default_value = DEFAULT_REFERENCE_TIMEZONE)]
    pub timezone: String,

    /// Comma-separated progression thresholds (e.g. 5m,1h,1d)
    #[arg(long, default_value = "5m,10m,30m,1h,2h,4h,8h,1d,2d,4d")]
    pub intervals: String,

    /// Row ordering
    #[arg(long, value_enum, default_value_t = RowOrder::Input)]
    pub sort: RowOrder,

    /// Member (name or id) to include in time-to-solve series; repeatable
    #[arg(long = "member")]
    pub members: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Self::parse())
    }

    /// Same as [`Settings::load`] with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map(Self::resolve)
    }

    fn resolve(mut settings: Settings) -> Settings {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Progression thresholds in seconds.
    pub fn interval_seconds(&self) -> Result<Vec<i64>> {
        parse_interval_list(&self.intervals)
    }

    /// Daily-epoch resolver for the configured reference timezone.
    pub fn resolver(&self) -> Result<TimezoneResolver> {
        TimezoneResolver::new(&self.timezone)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LeaderboardError;
    use crate::formatting::DEFAULT_PROGRESSION_INTERVALS;
    use chrono_tz::Tz;

    fn load(args: &[&str]) -> Settings {
        let mut full = vec!["aoc-leaderboard"];
        full.extend_from_slice(args);
        Settings::load_from_args(full).expect("valid arguments")
    }

    #[test]
    fn test_defaults() {
        let settings = load(&["board.json"]);
        assert_eq!(settings.snapshot, PathBuf::from("board.json"));
        assert_eq!(settings.sort, RowOrder::Input);
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.members.is_empty());
        assert_eq!(
            settings.interval_seconds().unwrap(),
            DEFAULT_PROGRESSION_INTERVALS.to_vec()
        );
    }

    #[test]
    fn test_default_resolver_is_eastern() {
        // Only meaningful when the environment does not override the zone.
        if std::env::var_os("AOC_TIMEZONE").is_some() {
            return;
        }
        let settings = load(&["board.json"]);
        assert_eq!(settings.resolver().unwrap().tz(), Tz::America__New_York);
    }

    #[test]
    fn test_explicit_values() {
        let settings = load(&[
            "board.json",
            "--timezone",
            "Europe/Paris",
            "--intervals",
            "1m,1h",
            "--sort",
            "standings",
            "--member",
            "alice",
            "--member",
            "42",
            "--format",
            "json",
        ]);
        assert_eq!(settings.resolver().unwrap().tz(), Tz::Europe__Paris);
        assert_eq!(settings.interval_seconds().unwrap(), vec![60, 3600]);
        assert_eq!(settings.sort, RowOrder::Standings);
        assert_eq!(settings.members, vec!["alice", "42"]);
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_debug_overrides_log_level() {
        let settings = load(&["board.json", "--log-level", "ERROR", "--debug"]);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_invalid_timezone_is_reported() {
        let settings = load(&["board.json", "--timezone", "Nowhere/Land"]);
        assert!(matches!(
            settings.resolver(),
            Err(LeaderboardError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result = Settings::load_from_args(["aoc-leaderboard", "board.json", "--log-level", "LOUD"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_snapshot_rejected() {
        assert!(Settings::load_from_args(["aoc-leaderboard"]).is_err());
    }
}

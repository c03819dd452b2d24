use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone as _};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{LeaderboardError, Result};

/// Zone in which the contest unlocks its daily puzzles.
pub const DEFAULT_REFERENCE_TIMEZONE: &str = "America/New_York";

// ── DailyEpochResolver ────────────────────────────────────────────────────────

/// Maps a Unix timestamp to the Unix timestamp of local midnight on the same
/// calendar date in some reference zone.
///
/// Implementations must return the same value for every input within one
/// local day, and must be monotonic with the input. `None` means the
/// timestamp cannot be placed on a calendar.
pub trait DailyEpochResolver {
    fn midnight_of(&self, ts: i64) -> Option<i64>;
}

impl<F> DailyEpochResolver for F
where
    F: Fn(i64) -> Option<i64>,
{
    fn midnight_of(&self, ts: i64) -> Option<i64> {
        self(ts)
    }
}

// ── TimezoneResolver ──────────────────────────────────────────────────────────

/// [`DailyEpochResolver`] backed by an IANA timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneResolver {
    tz: Tz,
}

impl TimezoneResolver {
    /// Build a resolver for the IANA zone `tz_name`.
    pub fn new(tz_name: &str) -> Result<Self> {
        tz_name
            .parse::<Tz>()
            .map(|tz| Self { tz })
            .map_err(|_| LeaderboardError::InvalidTimezone(tz_name.to_string()))
    }

    /// Like [`TimezoneResolver::new`] but falls back to the default reference
    /// zone, logging a warning, when `tz_name` is not recognised.
    pub fn new_or_default(tz_name: &str) -> Self {
        Self::new(tz_name).unwrap_or_else(|_| {
            warn!(
                "TimezoneResolver: unrecognised timezone \"{}\", falling back to {}",
                tz_name, DEFAULT_REFERENCE_TIMEZONE
            );
            Self::default()
        })
    }

    pub fn from_tz(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Validate that `tz_name` is a recognised IANA timezone identifier.
    pub fn validate_timezone(tz_name: &str) -> bool {
        tz_name.parse::<Tz>().is_ok()
    }

    /// Convert a Unix timestamp into the reference zone.
    pub fn to_local(&self, ts: i64) -> Option<DateTime<Tz>> {
        DateTime::from_timestamp(ts, 0).map(|utc| utc.with_timezone(&self.tz))
    }

    /// Local midnight of the calendar date containing `ts`.
    ///
    /// An ambiguous midnight resolves to its earliest instant. When a DST
    /// transition skips midnight, the first valid local instant of the date
    /// is used instead.
    pub fn local_midnight(&self, ts: i64) -> Option<DateTime<Tz>> {
        let local = self.to_local(ts)?;
        let midnight = local.date_naive().and_hms_opt(0, 0, 0)?;
        match self.tz.from_local_datetime(&midnight) {
            LocalResult::Single(dt) => Some(dt),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => self.first_valid_after(midnight),
        }
    }

    // Scan forward in quarter-hour steps; every real zone offset is a
    // multiple of 15 minutes.
    fn first_valid_after(&self, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
        (1..=24 * 4).find_map(|quarter| {
            let candidate = naive + chrono::Duration::minutes(15 * quarter);
            self.tz.from_local_datetime(&candidate).earliest()
        })
    }
}

impl Default for TimezoneResolver {
    fn default() -> Self {
        Self {
            tz: Tz::America__New_York,
        }
    }
}

impl DailyEpochResolver for TimezoneResolver {
    fn midnight_of(&self, ts: i64) -> Option<i64> {
        self.local_midnight(ts).map(|dt| dt.timestamp())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

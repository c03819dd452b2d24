use crate::error::{LeaderboardError, Result};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Elapsed-time thresholds used for progression curves, in seconds:
/// 5m, 10m, 30m, 1h, 2h, 4h, 8h, 1d, 2d, 4d.
pub const DEFAULT_PROGRESSION_INTERVALS: [i64; 10] = [
    5 * MINUTE,
    10 * MINUTE,
    30 * MINUTE,
    HOUR,
    2 * HOUR,
    4 * HOUR,
    8 * HOUR,
    DAY,
    2 * DAY,
    4 * DAY,
];

/// Format a number of seconds as a compact label using the largest unit that
/// divides it evenly.
///
/// # Examples
///
/// ```
/// use leaderboard_core::formatting::format_interval;
///
/// assert_eq!(format_interval(300), "5m");
/// assert_eq!(format_interval(7200), "2h");
/// assert_eq!(format_interval(86400), "1d");
/// assert_eq!(format_interval(90), "90s");
/// ```
pub fn format_interval(seconds: i64) -> String {
    if seconds != 0 {
        for (unit, suffix) in [(DAY, "d"), (HOUR, "h"), (MINUTE, "m")] {
            if seconds % unit == 0 {
                return format!("{}{}", seconds / unit, suffix);
            }
        }
    }
    format!("{}s", seconds)
}

/// Parse a compact interval label (`"30s"`, `"5m"`, `"1h"`, `"2d"`) into
/// seconds. A bare number is taken as seconds.
///
/// # Examples
///
/// ```
/// use leaderboard_core::formatting::parse_interval;
///
/// assert_eq!(parse_interval("5m").unwrap(), 300);
/// assert_eq!(parse_interval("45").unwrap(), 45);
/// assert!(parse_interval("soon").is_err());
/// ```
pub fn parse_interval(label: &str) -> Result<i64> {
    let trimmed = label.trim();
    let invalid = || LeaderboardError::InvalidInterval(label.to_string());

    let (digits, unit) = match trimmed.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&trimmed[..idx], c.to_ascii_lowercase()),
        Some(_) => (trimmed, 's'),
        None => return Err(invalid()),
    };

    let value: i64 = digits.parse().map_err(|_| invalid())?;
    if value < 0 {
        return Err(invalid());
    }

    let multiplier = match unit {
        's' => 1,
        'm' => MINUTE,
        'h' => HOUR,
        'd' => DAY,
        _ => return Err(invalid()),
    };

    value.checked_mul(multiplier).ok_or_else(invalid)
}

/// Parse a comma-separated list of interval labels.
pub fn parse_interval_list(list: &str) -> Result<Vec<i64>> {
    list.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_interval)
        .collect()
}

/// Format an elapsed number of seconds as `"1h 02m 03s"`.
///
/// Leading zero units are omitted; negative durations keep their sign.
///
/// # Examples
///
/// ```
/// use leaderboard_core::formatting::format_elapsed;
///
/// assert_eq!(format_elapsed(3723), "1h 02m 03s");
/// assert_eq!(format_elapsed(59), "59s");
/// assert_eq!(format_elapsed(-150), "-2m 30s");
/// ```
pub fn format_elapsed(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    let days = total / DAY as u64;
    let hours = (total % DAY as u64) / HOUR as u64;
    let minutes = (total % HOUR as u64) / MINUTE as u64;
    let secs = total % MINUTE as u64;

    let body = if days > 0 {
        format!("{}d {:02}h {:02}m {:02}s", days, hours, minutes, secs)
    } else if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, secs)
    } else {
        format!("{}s", secs)
    };
    format!("{}{}", sign, body)
}

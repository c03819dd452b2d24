//! Per-member rows and time-based aggregates.
//!
//! Every function here is pure: inputs are borrowed, never mutated, and
//! sparse data (days or parts not yet completed) degrades to `None` values or
//! zero counts instead of errors.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use leaderboard_core::models::{DayColumns, Member, MemberRow, Part, MAX_PUZZLE_DAY};
use leaderboard_core::settings::RowOrder;
use leaderboard_core::time_utils::DailyEpochResolver;
use serde::Serialize;

// ── Analysis window ───────────────────────────────────────────────────────────

/// Largest number of distinct days any single member has completions for.
///
/// Returns 0 for an empty collection or when nobody has completed anything.
pub fn max_completed_day<'a, I>(members: I) -> u32
where
    I: IntoIterator<Item = &'a Member>,
{
    members
        .into_iter()
        .map(|m| m.completions.len() as u32)
        .max()
        .unwrap_or(0)
}

/// The analysis window `1..=max_completed_day(members)`; empty when nobody
/// has completed anything.
pub fn day_range<'a, I>(members: I) -> RangeInclusive<u32>
where
    I: IntoIterator<Item = &'a Member>,
{
    1..=max_completed_day(members)
}

// ── Flattening ────────────────────────────────────────────────────────────────

/// Project `member` into a fixed-shape row covering days `1..=25`.
pub fn flatten_member(member: &Member) -> MemberRow {
    let mut days = [DayColumns::default(); MAX_PUZZLE_DAY as usize];
    for (idx, cols) in days.iter_mut().enumerate() {
        let day = idx as u32 + 1;
        *cols = DayColumns {
            part1_ts: member.completion_ts(day, Part::One),
            part2_ts: member.completion_ts(day, Part::Two),
            diff: member.daily_time_diff(day),
        };
    }

    MemberRow {
        id: member.id,
        name: member.name.clone(),
        total_stars: member.total_stars,
        global_score: member.global_score,
        local_score: member.local_score,
        last_star_timestamp: member.last_star_timestamp,
        days,
    }
}

/// Flatten every member, preserving input order.
pub fn flatten_members<'a, I>(members: I) -> Vec<MemberRow>
where
    I: IntoIterator<Item = &'a Member>,
{
    members.into_iter().map(flatten_member).collect()
}

/// Rows reordered by `order`. The input slice is left untouched.
pub fn sort_rows(rows: &[MemberRow], order: RowOrder) -> Vec<MemberRow> {
    let mut sorted = rows.to_vec();
    if order == RowOrder::Standings {
        sorted.sort_by(|a, b| {
            a.total_stars
                .cmp(&b.total_stars)
                .then(b.last_star_timestamp.cmp(&a.last_star_timestamp))
        });
    }
    sorted
}

/// The timestamp column of (`day`, `part`) across `rows`.
pub fn day_column(rows: &[MemberRow], day: u32, part: Part) -> Vec<Option<i64>> {
    rows.iter().map(|row| row.part_ts(day, part)).collect()
}

// ── Counts ────────────────────────────────────────────────────────────────────

/// Per-day number of rows with a part 1 completion and, independently, with a
/// part 2 completion.
pub fn daily_completion_counts(
    rows: &[MemberRow],
    days: RangeInclusive<u32>,
) -> (Vec<usize>, Vec<usize>) {
    days.map(|day| {
        let count = |part| rows.iter().filter(|r| r.part_ts(day, part).is_some()).count();
        (count(Part::One), count(Part::Two))
    })
    .unzip()
}

/// Stars held by one member, for the standings chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarTotal {
    pub id: u64,
    pub name: Option<String>,
    pub stars: u32,
}

pub fn star_totals(rows: &[MemberRow]) -> Vec<StarTotal> {
    rows.iter()
        .map(|r| StarTotal {
            id: r.id,
            name: r.name.clone(),
            stars: r.total_stars,
        })
        .collect()
}

// ── Progression ───────────────────────────────────────────────────────────────

/// Earliest completion in a column, or `None` if the column is empty.
pub fn anchor_timestamp(column: &[Option<i64>]) -> Option<i64> {
    column.iter().flatten().min().copied()
}

/// Number of completions in `column` at most `threshold` seconds after the
/// column's anchor. A distance too large for an `i64` is never within.
pub fn count_within(column: &[Option<i64>], threshold: i64) -> usize {
    let Some(anchor) = anchor_timestamp(column) else {
        return 0;
    };
    column
        .iter()
        .flatten()
        .filter(|ts| ts.checked_sub(anchor).is_some_and(|d| d <= threshold))
        .count()
}

/// Cumulative completions per day over a list of elapsed-time thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progression {
    /// Thresholds in seconds, in the order the series are indexed.
    pub intervals: Vec<i64>,
    /// Day → completions (both parts) within each threshold of the anchor.
    pub per_day: BTreeMap<u32, Vec<usize>>,
    /// Index-wise mean of the per-day series.
    pub average: Vec<f64>,
}

/// For every day and threshold, count completions of both parts that landed
/// within the threshold of the earliest completion of the same (day, part).
///
/// Every per-day series has exactly `intervals.len()` entries. The average is
/// all zeros when `days` is empty.
pub fn cumulative_progression_by_interval(
    rows: &[MemberRow],
    days: RangeInclusive<u32>,
    intervals: &[i64],
) -> Progression {
    let mut per_day = BTreeMap::new();
    for day in days {
        let columns = Part::ALL.map(|part| day_column(rows, day, part));
        let counts: Vec<usize> = intervals
            .iter()
            .map(|t| columns.iter().map(|col| count_within(col, *t)).sum::<usize>())
            .collect();
        per_day.insert(day, counts);
    }

    let average = average_series(&per_day, intervals.len());
    Progression {
        intervals: intervals.to_vec(),
        per_day,
        average,
    }
}

fn average_series(per_day: &BTreeMap<u32, Vec<usize>>, len: usize) -> Vec<f64> {
    if per_day.is_empty() {
        return vec![0.0; len];
    }
    let day_count = per_day.len() as f64;
    (0..len)
        .map(|i| {
            let total: usize = per_day
                .values()
                .map(|series| series.get(i).copied().unwrap_or(0))
                .sum();
            total as f64 / day_count
        })
        .collect()
}

// ── Time to solve ─────────────────────────────────────────────────────────────

/// Seconds from local midnight (per `resolver`) to the part 1 completion, for
/// each day; `None` where part 1 is missing.
pub fn time_to_solve_part1<R>(
    member: &Member,
    days: RangeInclusive<u32>,
    resolver: &R,
) -> Vec<Option<i64>>
where
    R: DailyEpochResolver + ?Sized,
{
    days.map(|day| -> Option<i64> {
        let ts = member.completion_ts(day, Part::One)?;
        resolver
            .midnight_of(ts)
            .and_then(|midnight| ts.checked_sub(midnight))
    })
    .collect()
}

/// Seconds from part 1 to part 2, for each day; `None` unless both exist.
pub fn time_to_solve_part2_after_part1(
    member: &Member,
    days: RangeInclusive<u32>,
) -> Vec<Option<i64>> {
    days.map(|day| member.daily_time_diff(day)).collect()
}

// ── Member lookup ─────────────────────────────────────────────────────────────

/// Find a member by exact name, or failing that by decimal id.
pub fn find_member<'a, I>(members: I, selector: &str) -> Option<&'a Member>
where
    I: IntoIterator<Item = &'a Member>,
{
    let wanted_id = selector.parse::<u64>().ok();
    let mut by_id = None;
    for member in members {
        if member.name.as_deref() == Some(selector) {
            return Some(member);
        }
        if by_id.is_none() && wanted_id == Some(member.id) {
            by_id = Some(member);
        }
    }
    by_id
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Main analysis pipeline.
//!
//! Runs every projection over one snapshot and bundles the results into an
//! [`AnalysisReport`] ready for the reporting layer.

use std::path::Path;

use leaderboard_core::error::Result;
use leaderboard_core::formatting::{format_interval, DEFAULT_PROGRESSION_INTERVALS};
use leaderboard_core::models::{Leaderboard, Member, MemberRow};
use leaderboard_core::settings::{RowOrder, Settings};
use leaderboard_core::time_utils::DailyEpochResolver;
use serde::Serialize;
use tracing::{info, warn};

use crate::parser::parse_file;
use crate::projector::{
    cumulative_progression_by_interval, daily_completion_counts, day_range, find_member,
    flatten_members, sort_rows, star_totals, time_to_solve_part1,
    time_to_solve_part2_after_part1, Progression, StarTotal,
};

// ── Public types ──────────────────────────────────────────────────────────────

/// Knobs for [`analyze_snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Progression thresholds in seconds.
    pub intervals: Vec<i64>,
    /// Order of the flattened rows and star totals.
    pub order: RowOrder,
    /// Members (name or id) to compute time-to-solve series for. Empty means
    /// every member.
    pub members: Vec<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_PROGRESSION_INTERVALS.to_vec(),
            order: RowOrder::Input,
            members: Vec::new(),
        }
    }
}

impl AnalysisOptions {
    /// Build options from command-line settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            intervals: settings.interval_seconds()?,
            order: settings.sort,
            members: settings.members.clone(),
        })
    }
}

/// Snapshot-level facts about an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisMetadata {
    pub event: String,
    pub owner_id: u64,
    pub member_count: usize,
    /// Upper bound of the analysis window `1..=max_completed_day`.
    pub max_completed_day: u32,
}

/// Per-day star counts over the analysis window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCounts {
    pub days: Vec<u32>,
    pub part1: Vec<usize>,
    pub part2: Vec<usize>,
}

/// Time-to-solve series of one member, indexed like [`DailyCounts::days`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSeries {
    pub id: u64,
    pub name: Option<String>,
    /// Seconds from the daily unlock to the part 1 star.
    pub part1_since_unlock: Vec<Option<i64>>,
    /// Seconds from the part 1 star to the part 2 star.
    pub part2_after_part1: Vec<Option<i64>>,
}

/// The complete output of [`analyze_snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub metadata: AnalysisMetadata,
    pub rows: Vec<MemberRow>,
    pub star_totals: Vec<StarTotal>,
    pub daily_counts: DailyCounts,
    pub progression: Progression,
    /// Compact labels for `progression.intervals` (`"5m"`, `"1h"`, ...).
    pub interval_labels: Vec<String>,
    pub member_series: Vec<MemberSeries>,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run every projection over `leaderboard`.
///
/// 1. Flatten members into rows (sorted per `options.order`).
/// 2. Derive the analysis window.
/// 3. Count completions per day and build progression curves.
/// 4. Compute time-to-solve series for the selected members.
pub fn analyze_snapshot<R>(
    leaderboard: &Leaderboard,
    options: &AnalysisOptions,
    resolver: &R,
) -> AnalysisReport
where
    R: DailyEpochResolver + ?Sized,
{
    // ── Step 1: Rows ──────────────────────────────────────────────────────────
    let rows = sort_rows(&flatten_members(leaderboard.member_iter()), options.order);

    // ── Step 2: Window ────────────────────────────────────────────────────────
    let window = day_range(leaderboard.member_iter());
    info!(
        "Analysing {} members over days {}..={}",
        rows.len(),
        window.start(),
        window.end()
    );

    // ── Step 3: Aggregates ────────────────────────────────────────────────────
    let (part1, part2) = daily_completion_counts(&rows, window.clone());
    let progression = cumulative_progression_by_interval(&rows, window.clone(), &options.intervals);

    // ── Step 4: Member series ─────────────────────────────────────────────────
    let member_series = select_members(leaderboard, &options.members)
        .into_iter()
        .map(|member| MemberSeries {
            id: member.id,
            name: member.name.clone(),
            part1_since_unlock: time_to_solve_part1(member, window.clone(), resolver),
            part2_after_part1: time_to_solve_part2_after_part1(member, window.clone()),
        })
        .collect();

    AnalysisReport {
        metadata: AnalysisMetadata {
            event: leaderboard.event_identifier.clone(),
            owner_id: leaderboard.owner_id,
            member_count: leaderboard.member_count(),
            max_completed_day: *window.end(),
        },
        star_totals: star_totals(&rows),
        daily_counts: DailyCounts {
            days: window.collect(),
            part1,
            part2,
        },
        interval_labels: options
            .intervals
            .iter()
            .map(|s| format_interval(*s))
            .collect(),
        progression,
        member_series,
        rows,
    }
}

/// Load the snapshot at `path` and analyse it.
pub fn analyze_file<R>(
    path: impl AsRef<Path>,
    options: &AnalysisOptions,
    resolver: &R,
) -> Result<AnalysisReport>
where
    R: DailyEpochResolver + ?Sized,
{
    let leaderboard = parse_file(path)?;
    Ok(analyze_snapshot(&leaderboard, options, resolver))
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Resolve member selectors; unknown ones are logged and skipped.
fn select_members<'a>(leaderboard: &'a Leaderboard, selectors: &[String]) -> Vec<&'a Member> {
    if selectors.is_empty() {
        return leaderboard.member_iter().collect();
    }
    selectors
        .iter()
        .filter_map(|selector| {
            let found = find_member(leaderboard.member_iter(), selector);
            if found.is_none() {
                warn!("No member matches \"{}\"; skipping", selector);
            }
            found
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Plain-text rendering of an [`AnalysisReport`].

use std::fmt;

use leaderboard_core::formatting::format_elapsed;
use leaderboard_core::models::display_name;
use leaderboard_data::analysis::{AnalysisReport, MemberSeries};

const NAME_WIDTH: usize = 28;
const CELL_WIDTH: usize = 8;

/// Display adapter that renders a report as aligned text tables.
pub struct TextReport<'a>(pub &'a AnalysisReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let meta = &report.metadata;
        writeln!(
            f,
            "Leaderboard {} (owner {}): {} members, {} days analysed",
            meta.event, meta.owner_id, meta.member_count, meta.max_completed_day
        )?;

        writeln!(f)?;
        writeln!(f, "Stars per member")?;
        for total in &report.star_totals {
            let name = display_name(total.id, total.name.as_deref());
            writeln!(f, "  {:<width$} {:>3}", name, total.stars, width = NAME_WIDTH)?;
        }

        writeln!(f)?;
        writeln!(f, "Stars per day")?;
        writeln!(f, "  {:>4} {:>7} {:>7}", "Day", "Part 1", "Part 2")?;
        let counts = &report.daily_counts;
        for ((day, p1), p2) in counts.days.iter().zip(&counts.part1).zip(&counts.part2) {
            writeln!(f, "  {:>4} {:>7} {:>7}", day, p1, p2)?;
        }

        writeln!(f)?;
        writeln!(f, "Stars within time of first star")?;
        write!(f, "  {:>4}", "Day")?;
        for label in &report.interval_labels {
            write!(f, " {:>w$}", label, w = CELL_WIDTH)?;
        }
        writeln!(f)?;
        for (day, series) in &report.progression.per_day {
            write!(f, "  {:>4}", day)?;
            for count in series {
                write!(f, " {:>w$}", count, w = CELL_WIDTH)?;
            }
            writeln!(f)?;
        }
        write!(f, "  {:>4}", "Avg")?;
        for avg in &report.progression.average {
            write!(f, " {:>w$.1}", avg, w = CELL_WIDTH)?;
        }
        writeln!(f)?;

        for series in &report.member_series {
            writeln!(f)?;
            write_member_series(f, &counts.days, series)?;
        }

        Ok(())
    }
}

fn write_member_series(
    f: &mut fmt::Formatter<'_>,
    days: &[u32],
    series: &MemberSeries,
) -> fmt::Result {
    writeln!(
        f,
        "Time to solve: {}",
        display_name(series.id, series.name.as_deref())
    )?;
    writeln!(f, "  {:>4} {:>16} {:>16}", "Day", "Part 1", "Part 2 after 1")?;
    for ((day, p1), p2) in days
        .iter()
        .zip(&series.part1_since_unlock)
        .zip(&series.part2_after_part1)
    {
        writeln!(f, "  {:>4} {:>16} {:>16}", day, cell(*p1), cell(*p2))?;
    }
    Ok(())
}

fn cell(seconds: Option<i64>) -> String {
    seconds.map(format_elapsed).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaderboard_core::time_utils::TimezoneResolver;
    use leaderboard_data::analysis::{analyze_file, analyze_snapshot, AnalysisOptions};
    use leaderboard_data::parser::parse;
    use tempfile::TempDir;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "event": "2023",
            "owner_id": 1,
            "members": {
                "1": {
                    "id": 1, "name": "alice", "stars": 2,
                    "global_score": 0, "local_score": 2, "last_star_ts": 1701407100,
                    "completion_day_level": {
                        "1": {
                            "1": {"get_star_ts": 1701406900, "star_index": 1},
                            "2": {"get_star_ts": 1701407100, "star_index": 2}
                        }
                    }
                },
                "2": {
                    "id": 2, "name": null, "stars": 0,
                    "global_score": 0, "local_score": 0, "last_star_ts": 0,
                    "completion_day_level": {}
                }
            }
        })
    }

    fn sample_report(options: &AnalysisOptions) -> AnalysisReport {
        let board = parse(&sample_json().to_string()).unwrap();
        analyze_snapshot(&board, options, &TimezoneResolver::default())
    }

    #[test]
    fn test_text_report_sections() {
        let report = sample_report(&AnalysisOptions::default());
        let text = TextReport(&report).to_string();
        assert!(text.starts_with("Leaderboard 2023 (owner 1): 2 members, 1 days analysed"));
        assert!(text.contains("Stars per member"));
        assert!(text.contains("(anonymous user #2)"));
        assert!(text.contains("Stars within time of first star"));
        assert!(text.contains("5m"));
        assert!(text.contains("4d"));
        assert!(text.contains("Time to solve: alice"));
        // Part 1 at 1m 40s past unlock, part 2 3m 20s later.
        assert!(text.contains("1m 40s"));
        assert!(text.contains("3m 20s"));
    }

    #[test]
    fn test_text_report_missing_cells() {
        let options = AnalysisOptions {
            members: vec!["2".to_string()],
            ..AnalysisOptions::default()
        };
        let report = sample_report(&options);
        let text = TextReport(&report).to_string();
        let series_line = text
            .lines()
            .skip_while(|l| !l.starts_with("Time to solve"))
            .nth(2)
            .unwrap();
        assert_eq!(series_line.split_whitespace().collect::<Vec<_>>(), vec!["1", "-", "-"]);
    }

    #[test]
    fn test_text_report_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, sample_json().to_string()).unwrap();

        let options = AnalysisOptions::default();
        let from_file = analyze_file(&path, &options, &TimezoneResolver::default()).unwrap();
        let text = TextReport(&from_file).to_string();
        assert_eq!(text, TextReport(&sample_report(&options)).to_string());
    }

    #[test]
    fn test_cell() {
        assert_eq!(cell(None), "-");
        assert_eq!(cell(Some(61)), "1m 01s");
    }
}

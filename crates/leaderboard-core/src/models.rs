use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Highest puzzle day of an event. Flattened rows always carry this many days.
pub const MAX_PUZZLE_DAY: u32 = 25;

/// One of the two halves of a daily puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Part {
    One,
    Two,
}

impl Part {
    /// Both parts, in solving order.
    pub const ALL: [Part; 2] = [Part::One, Part::Two];

    /// The string key used for this part in the snapshot wire format.
    pub fn key(self) -> &'static str {
        match self {
            Part::One => "1",
            Part::Two => "2",
        }
    }

    /// 1-based numeric index of the part.
    pub fn index(self) -> u8 {
        match self {
            Part::One => 1,
            Part::Two => 2,
        }
    }
}

/// The instant a member completed one part of one day's puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarChallenge {
    /// Unix timestamp (seconds, UTC) of the completion.
    #[serde(rename = "get_star_ts")]
    pub completion_timestamp: i64,
    /// Ordering index assigned to the star by the leaderboard.
    pub star_index: i64,
}

/// Completions of a single day, keyed by part (`"1"` or `"2"`).
pub type DayCompletions = BTreeMap<String, StarChallenge>;

/// A leaderboard participant and every star they have collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: u64,
    /// Display name; `None` for anonymous participants.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "stars")]
    pub total_stars: u32,
    pub global_score: u64,
    pub local_score: u64,
    /// Unix timestamp of the most recent star.
    #[serde(rename = "last_star_ts")]
    pub last_star_timestamp: i64,
    /// Day key (`"1"`..) → part key (`"1"`/`"2"`) → completion.
    #[serde(rename = "completion_day_level")]
    pub completions: BTreeMap<String, DayCompletions>,
}

impl Member {
    /// Look up the completion of `part` on `day`, if any.
    pub fn completion(&self, day: u32, part: Part) -> Option<&StarChallenge> {
        self.completions
            .get(day.to_string().as_str())
            .and_then(|parts| parts.get(part.key()))
    }

    /// Timestamp of the completion of `part` on `day`, if any.
    pub fn completion_ts(&self, day: u32, part: Part) -> Option<i64> {
        self.completion(day, part).map(|c| c.completion_timestamp)
    }

    /// Seconds between part 1 and part 2 of `day`; `None` unless both exist
    /// and the difference fits in an `i64`.
    pub fn daily_time_diff(&self, day: u32) -> Option<i64> {
        let first = self.completion_ts(day, Part::One)?;
        let second = self.completion_ts(day, Part::Two)?;
        second.checked_sub(first)
    }

    /// Name to show in reports. Anonymous members are labelled by id.
    pub fn display_name(&self) -> String {
        display_name(self.id, self.name.as_deref())
    }
}

/// A complete leaderboard snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(rename = "event")]
    pub event_identifier: String,
    pub owner_id: u64,
    /// Member id string → member, in document order.
    pub members: IndexMap<String, Member>,
}

impl Leaderboard {
    /// Iterate over all members in document order.
    pub fn member_iter(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Number of members on the board.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Timestamps of one day inside a [`MemberRow`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayColumns {
    pub part1_ts: Option<i64>,
    pub part2_ts: Option<i64>,
    /// `part2_ts - part1_ts`, present only when both parts are completed.
    pub diff: Option<i64>,
}

impl DayColumns {
    pub fn part_ts(&self, part: Part) -> Option<i64> {
        match part {
            Part::One => self.part1_ts,
            Part::Two => self.part2_ts,
        }
    }
}

/// Flat, fixed-shape projection of a [`Member`].
///
/// Carries every scalar member field plus one [`DayColumns`] per puzzle day
/// in `1..=MAX_PUZZLE_DAY`. Serializes as a flat record with the column names
/// `day_{d}_part1_ts`, `day_{d}_part2_ts` and `day_{d}_diff`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub id: u64,
    pub name: Option<String>,
    pub total_stars: u32,
    pub global_score: u64,
    pub local_score: u64,
    pub last_star_timestamp: i64,
    pub days: [DayColumns; MAX_PUZZLE_DAY as usize],
}

impl MemberRow {
    /// Columns of `day` (1-based). `None` outside `1..=MAX_PUZZLE_DAY`.
    pub fn day(&self, day: u32) -> Option<&DayColumns> {
        if day == 0 {
            return None;
        }
        self.days.get(day as usize - 1)
    }

    /// Completion timestamp of `part` on `day`, if any.
    pub fn part_ts(&self, day: u32, part: Part) -> Option<i64> {
        self.day(day).and_then(|cols| cols.part_ts(part))
    }

    /// Part 2 minus part 1 on `day`, if both are present.
    pub fn diff(&self, day: u32) -> Option<i64> {
        self.day(day).and_then(|cols| cols.diff)
    }

    pub fn display_name(&self) -> String {
        display_name(self.id, self.name.as_deref())
    }

    /// Column names in serialization order.
    pub fn column_names() -> Vec<String> {
        let mut names: Vec<String> = [
            "id",
            "name",
            "stars",
            "global_score",
            "local_score",
            "last_star_ts",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        for day in 1..=MAX_PUZZLE_DAY {
            names.push(format!("day_{}_part1_ts", day));
            names.push(format!("day_{}_part2_ts", day));
            names.push(format!("day_{}_diff", day));
        }
        names
    }
}

impl Serialize for MemberRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6 + 3 * self.days.len()))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("stars", &self.total_stars)?;
        map.serialize_entry("global_score", &self.global_score)?;
        map.serialize_entry("local_score", &self.local_score)?;
        map.serialize_entry("last_star_ts", &self.last_star_timestamp)?;
        for (idx, cols) in self.days.iter().enumerate() {
            let day = idx + 1;
            map.serialize_entry(&format!("day_{}_part1_ts", day), &cols.part1_ts)?;
            map.serialize_entry(&format!("day_{}_part2_ts", day), &cols.part2_ts)?;
            map.serialize_entry(&format!("day_{}_diff", day), &cols.diff)?;
        }
        map.end()
    }
}

/// Report label for a member: its name, or an id-based placeholder when
/// the member is anonymous.
pub fn display_name(id: u64, name: Option<&str>) -> String {
    match name {
        Some(n) => n.to_string(),
        None => format!("(anonymous user #{})", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(ts: i64) -> StarChallenge {
        StarChallenge {
            completion_timestamp: ts,
            star_index: 0,
        }
    }

    fn member_with(days: &[(u32, Option<i64>, Option<i64>)]) -> Member {
        let mut completions = BTreeMap::new();
        for (day, p1, p2) in days {
            let mut parts = DayCompletions::new();
            if let Some(ts) = p1 {
                parts.insert("1".to_string(), challenge(*ts));
            }
            if let Some(ts) = p2 {
                parts.insert("2".to_string(), challenge(*ts));
            }
            completions.insert(day.to_string(), parts);
        }
        Member {
            id: 7,
            name: Some("alice".to_string()),
            total_stars: 0,
            global_score: 0,
            local_score: 0,
            last_star_timestamp: 0,
            completions,
        }
    }

    #[test]
    fn test_part_keys() {
        assert_eq!(Part::One.key(), "1");
        assert_eq!(Part::Two.key(), "2");
        assert_eq!(Part::ALL.map(Part::index), [1, 2]);
    }

    #[test]
    fn test_member_completion_lookup() {
        let m = member_with(&[(3, Some(100), Some(250))]);
        assert_eq!(m.completion_ts(3, Part::One), Some(100));
        assert_eq!(m.completion_ts(3, Part::Two), Some(250));
        assert_eq!(m.completion_ts(4, Part::One), None);
        assert_eq!(m.completion_ts(0, Part::One), None);
    }

    #[test]
    fn test_daily_time_diff_requires_both_parts() {
        let m = member_with(&[(1, Some(100), Some(250)), (2, Some(10), None), (3, None, Some(5))]);
        assert_eq!(m.daily_time_diff(1), Some(150));
        assert_eq!(m.daily_time_diff(2), None);
        assert_eq!(m.daily_time_diff(3), None);
        assert_eq!(m.daily_time_diff(9), None);
    }

    #[test]
    fn test_daily_time_diff_unrepresentable() {
        let m = member_with(&[(1, Some(i64::MIN), Some(i64::MAX)), (2, Some(-11), Some(i64::MAX - 10))]);
        assert_eq!(m.daily_time_diff(1), None);
        assert_eq!(m.daily_time_diff(2), None);
    }

    #[test]
    fn test_display_name_anonymous() {
        let mut m = member_with(&[]);
        assert_eq!(m.display_name(), "alice");
        m.name = None;
        assert_eq!(m.display_name(), "(anonymous user #7)");
    }

    #[test]
    fn test_member_deserialize_null_name() {
        let json = r#"{
            "id": 12, "name": null, "stars": 2, "global_score": 0,
            "local_score": 5, "last_star_ts": 1700000000,
            "completion_day_level": {"1": {"1": {"get_star_ts": 1700000000, "star_index": 3}}}
        }"#;
        let m: Member = serde_json::from_str(json).unwrap();
        assert_eq!(m.name, None);
        assert_eq!(m.total_stars, 2);
        assert_eq!(m.completion_ts(1, Part::One), Some(1_700_000_000));
        assert_eq!(m.completion(1, Part::One).unwrap().star_index, 3);
    }

    #[test]
    fn test_member_deserialize_missing_name() {
        let json = r#"{
            "id": 12, "stars": 0, "global_score": 0, "local_score": 0,
            "last_star_ts": 0, "completion_day_level": {}
        }"#;
        let m: Member = serde_json::from_str(json).unwrap();
        assert!(m.name.is_none());
    }

    #[test]
    fn test_member_row_day_bounds() {
        let mut days = [DayColumns::default(); MAX_PUZZLE_DAY as usize];
        days[0].part1_ts = Some(1);
        days[24].part2_ts = Some(2);
        let row = MemberRow {
            id: 1,
            name: None,
            total_stars: 0,
            global_score: 0,
            local_score: 0,
            last_star_timestamp: 0,
            days,
        };
        assert_eq!(row.part_ts(1, Part::One), Some(1));
        assert_eq!(row.part_ts(25, Part::Two), Some(2));
        assert!(row.day(0).is_none());
        assert!(row.day(26).is_none());
    }

    #[test]
    fn test_member_row_serializes_flat_columns() {
        let mut days = [DayColumns::default(); MAX_PUZZLE_DAY as usize];
        days[4] = DayColumns {
            part1_ts: Some(100),
            part2_ts: Some(250),
            diff: Some(150),
        };
        let row = MemberRow {
            id: 1,
            name: Some("bob".to_string()),
            total_stars: 2,
            global_score: 0,
            local_score: 10,
            last_star_timestamp: 250,
            days,
        };
        let value = serde_json::to_value(&row).unwrap();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 6 + 3 * 25);
        assert_eq!(obj.len(), MemberRow::column_names().len());
        assert_eq!(obj["stars"], 2);
        assert_eq!(obj["day_5_part1_ts"], 100);
        assert_eq!(obj["day_5_diff"], 150);
        assert!(obj["day_6_part1_ts"].is_null());
        assert!(obj["day_25_diff"].is_null());
    }
}

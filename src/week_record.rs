use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time_of_day::{parse_time, TimeOfDay};

/// 集計対象の曜日。月曜日から金曜日までの5日。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// 保存形式と表示に使う曜日名。
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "월요일",
            Weekday::Tuesday => "화요일",
            Weekday::Wednesday => "수요일",
            Weekday::Thursday => "목요일",
            Weekday::Friday => "금요일",
        }
    }

    /// 暦の曜日を集計対象の曜日に変換する。土日は金曜日として扱う。
    pub fn clamped(weekday: chrono::Weekday) -> Self {
        let index = (weekday.num_days_from_monday() as usize).min(4);
        Self::ALL[index]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 1日分の出勤・退勤時刻。
///
/// 入力された文字列をそのまま保持する。空文字列は未入力を表す。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub start: String,
    pub end: String,
}

impl DayEntry {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn start_time(&self) -> Option<TimeOfDay> {
        parse_time(&self.start)
    }

    pub fn end_time(&self) -> Option<TimeOfDay> {
        parse_time(&self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.start.trim().is_empty() && self.end.trim().is_empty()
    }
}

/// 1週間（月曜日から金曜日）の記録。
///
/// 保存時のキーの順序を固定するため、曜日ごとのフィールドで持つ。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRecord {
    #[serde(rename = "월요일", default)]
    monday: DayEntry,
    #[serde(rename = "화요일", default)]
    tuesday: DayEntry,
    #[serde(rename = "수요일", default)]
    wednesday: DayEntry,
    #[serde(rename = "목요일", default)]
    thursday: DayEntry,
    #[serde(rename = "금요일", default)]
    friday: DayEntry,
}

impl WeekRecord {
    pub fn day(&self, weekday: Weekday) -> &DayEntry {
        match weekday {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
        }
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut DayEntry {
        match weekday {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
        }
    }

    /// 指定した曜日の記録を置き換える。
    pub fn set_day(&mut self, weekday: Weekday, entry: DayEntry) {
        *self.day_mut(weekday) = entry;
    }
}

/// 1ユーザー分の週ラベルから週記録への対応。
pub type Ledger = BTreeMap<String, WeekRecord>;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DayEntry, WeekRecord, Weekday};

    #[rstest]
    #[case::monday(chrono::Weekday::Mon, Weekday::Monday)]
    #[case::friday(chrono::Weekday::Fri, Weekday::Friday)]
    #[case::saturday(chrono::Weekday::Sat, Weekday::Friday)]
    #[case::sunday(chrono::Weekday::Sun, Weekday::Friday)]
    fn test_weekday_clamped(#[case] input: chrono::Weekday, #[case] expected: Weekday) {
        assert_eq!(Weekday::clamped(input), expected);
    }

    /// 保存形式は曜日名をキーとし、月曜日から順に並ぶ。
    #[test]
    fn test_week_record_serialize() {
        let mut record = WeekRecord::default();
        record.set_day(Weekday::Tuesday, DayEntry::new("09:00", "18:00"));

        let json = serde_json::to_string(&record).unwrap();

        assert_eq!(
            json,
            concat!(
                r#"{"월요일":{"start":"","end":""},"#,
                r#""화요일":{"start":"09:00","end":"18:00"},"#,
                r#""수요일":{"start":"","end":""},"#,
                r#""목요일":{"start":"","end":""},"#,
                r#""금요일":{"start":"","end":""}}"#,
            )
        );
    }

    /// 欠けている曜日は未入力として読み込む。
    #[test]
    fn test_week_record_deserialize_missing_days() {
        let record: WeekRecord =
            serde_json::from_str(r#"{"금요일":{"start":"10:00","end":"19:00"}}"#).unwrap();

        assert!(record.day(Weekday::Monday).is_empty());
        assert_eq!(record.day(Weekday::Friday), &DayEntry::new("10:00", "19:00"));
    }

    #[test]
    fn test_day_entry_times() {
        let entry = DayEntry::new("00:00", "");

        assert_eq!(entry.start_time().map(|t| t.minutes()), Some(0));
        assert_eq!(entry.end_time(), None);
        assert!(!entry.is_empty());
    }
}

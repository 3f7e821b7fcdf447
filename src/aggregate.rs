use chrono::{Datelike, NaiveDate};

use crate::week_record::{WeekRecord, Weekday};
use crate::work_time::{minutes_to_hours, worked_minutes};

/// 1週間分の集計結果。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeeklySummary {
    /// 月曜日から順の曜日ごとの勤務分数。
    pub per_day: [(Weekday, u32); 5],
    /// 5日間の合計勤務分数。
    pub weekly_total: u32,
    /// 月曜日から`today`までの合計勤務分数。
    pub through_today: u32,
    /// 集計の基準とした曜日。土日は金曜日になる。
    pub today: Weekday,
}

impl WeeklySummary {
    pub fn weekly_total_hours(&self) -> f64 {
        minutes_to_hours(self.weekly_total)
    }

    pub fn through_today_hours(&self) -> f64 {
        minutes_to_hours(self.through_today)
    }
}

/// 週の記録を集計する。
///
/// # Arguments
///
/// * `record` - 集計する週の記録
/// * `today` - 今日の日付。土日の場合は金曜日までを集計する
pub fn aggregate(record: &WeekRecord, today: NaiveDate) -> WeeklySummary {
    let today = Weekday::clamped(today.weekday());
    let per_day = Weekday::ALL.map(|weekday| {
        let entry = record.day(weekday);
        (weekday, worked_minutes(entry.start_time(), entry.end_time()))
    });

    let weekly_total = per_day.iter().map(|(_, minutes)| minutes).sum();
    let through_today = per_day
        .iter()
        .take_while(|(weekday, _)| *weekday <= today)
        .map(|(_, minutes)| minutes)
        .sum();

    WeeklySummary {
        per_day,
        weekly_total,
        through_today,
        today,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::aggregate;
    use crate::week_record::{DayEntry, WeekRecord, Weekday};

    fn full_week() -> WeekRecord {
        let mut record = WeekRecord::default();
        record.set_day(Weekday::Monday, DayEntry::new("09:00", "18:00")); // 480
        record.set_day(Weekday::Tuesday, DayEntry::new("09:00", "20:00")); // 540
        record.set_day(Weekday::Wednesday, DayEntry::new("10:00", "12:00")); // 120
        record.set_day(Weekday::Thursday, DayEntry::new("", "18:00")); // 0
        record.set_day(Weekday::Friday, DayEntry::new("08:00", "08:03")); // 3
        record
    }

    /// 2025年10月13日は月曜日。
    #[rstest]
    #[case::monday(NaiveDate::from_ymd_opt(2025, 10, 13).unwrap(), Weekday::Monday, 480)]
    #[case::wednesday(NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(), Weekday::Wednesday, 1140)]
    #[case::friday(NaiveDate::from_ymd_opt(2025, 10, 17).unwrap(), Weekday::Friday, 1143)]
    #[case::saturday(NaiveDate::from_ymd_opt(2025, 10, 18).unwrap(), Weekday::Friday, 1143)]
    #[case::sunday(NaiveDate::from_ymd_opt(2025, 10, 19).unwrap(), Weekday::Friday, 1143)]
    fn test_aggregate_through_today(
        #[case] today: NaiveDate,
        #[case] expected_today: Weekday,
        #[case] expected_minutes: u32,
    ) {
        let summary = aggregate(&full_week(), today);

        assert_eq!(summary.today, expected_today);
        assert_eq!(summary.through_today, expected_minutes);
        assert_eq!(summary.weekly_total, 1143);
    }

    #[test]
    fn test_aggregate_per_day() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();

        let summary = aggregate(&full_week(), today);

        assert_eq!(
            summary.per_day,
            [
                (Weekday::Monday, 480),
                (Weekday::Tuesday, 540),
                (Weekday::Wednesday, 120),
                (Weekday::Thursday, 0),
                (Weekday::Friday, 3),
            ]
        );
        assert_eq!(summary.weekly_total_hours(), 19.05);
        assert_eq!(summary.through_today_hours(), 19.0);
    }

    #[test]
    fn test_aggregate_empty_week() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 17).unwrap();

        let summary = aggregate(&WeekRecord::default(), today);

        assert_eq!(summary.weekly_total, 0);
        assert_eq!(summary.through_today, 0);
    }
}
